//! One-shot messages carried across a redirect in a short-lived cookie.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};

pub const FLASH_COOKIE: &str = "quill_flash";

/// A message shown once on the next rendered login or signup page.
///
/// The cookie holds only the code, never free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    InvalidCredentials,
    UsernameTaken,
    InvalidSignup,
    SignedUp,
    LoggedOut,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::InvalidCredentials => "invalid_credentials",
            Flash::UsernameTaken => "username_taken",
            Flash::InvalidSignup => "invalid_signup",
            Flash::SignedUp => "signed_up",
            Flash::LoggedOut => "logged_out",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid_credentials" => Some(Flash::InvalidCredentials),
            "username_taken" => Some(Flash::UsernameTaken),
            "invalid_signup" => Some(Flash::InvalidSignup),
            "signed_up" => Some(Flash::SignedUp),
            "logged_out" => Some(Flash::LoggedOut),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::InvalidCredentials => "Invalid username or password.",
            Flash::UsernameTaken => "That username is already taken.",
            Flash::InvalidSignup => {
                "Enter a username of at most 30 characters and a non-empty password."
            }
            Flash::SignedUp => "Account created. Please log in.",
            Flash::LoggedOut => "You have been logged out.",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            Flash::InvalidCredentials | Flash::UsernameTaken | Flash::InvalidSignup
        )
    }

    /// The cookie that delivers this message.
    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, self.code())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(60))
            .finish()
    }

    /// Read the pending message, if any.
    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        req.cookie(FLASH_COOKIE)
            .and_then(|cookie| Flash::from_code(cookie.value()))
    }
}

/// A cookie that deletes the flash cookie.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
