//! Data Transfer Objects - form payloads and the values handed to templates.

use serde::{Deserialize, Serialize};

/// Title and body submitted from the update form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Username and password submitted from the signup and login forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// A post as the templates see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub img_name: Option<String>,
    /// Calendar date in the configured timezone, `YYYY-MM-DD`.
    pub created_on: String,
    /// Full RFC 3339 timestamp.
    pub created_at: String,
}
