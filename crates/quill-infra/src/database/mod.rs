//! Database connection management and repositories.

mod connections;
pub mod entity;
mod repositories;
mod sea_orm_base;

pub use connections::{DatabaseConfig, connect};
pub use repositories::{SqlPostRepository, SqlUserRepository};
pub use sea_orm_base::SeaOrmRepository;

#[cfg(test)]
mod tests;
