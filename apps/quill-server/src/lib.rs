//! # Quill Server
//!
//! A template-rendered blog: public post pages plus an admin area behind a
//! session login. The binary in `main.rs` wires this library to a database
//! and an HTTP listener.

pub mod config;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
pub mod views;
