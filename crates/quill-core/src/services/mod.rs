//! Services composed purely from ports.

mod session;

pub use session::SessionManager;
