//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains the post and user model, the rules they obey, and the
//! ports that infrastructure must implement. It has no database or HTTP code.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
