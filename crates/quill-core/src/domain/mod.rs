//! Domain entities - the core business objects.

pub mod image;
mod post;
mod session;
mod user;

pub use image::{AllowedExtensions, ImageName};
pub use post::{BODY_MAX_CHARS, NewPost, Post, PostContent, TITLE_MAX_CHARS};
pub use session::Session;
pub use user::{NewUser, USERNAME_MAX_CHARS, User, validate_username};
