//! # Quill Shared
//!
//! Form payloads, view models, and the error page model.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
