//! Uploaded image names.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::DomainError;

/// Extensions accepted when nothing else is configured.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Case-insensitive set of accepted file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedExtensions(BTreeSet<String>);

impl AllowedExtensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        )
    }

    /// Parse a comma separated list such as `png, jpg`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(&extension.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for AllowedExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_EXTENSIONS)
    }
}

/// A validated image filename, kept exactly as uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName(String);

impl ImageName {
    /// Validate an uploaded filename against the allowed extensions.
    ///
    /// The name needs a dot, a non-empty stem, and an allowed extension after
    /// the last dot. Names carrying a path are rejected outright.
    pub fn parse(filename: &str, allowed: &AllowedExtensions) -> Result<Self, DomainError> {
        if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
            return Err(DomainError::Validation(format!(
                "Invalid file name: {filename}"
            )));
        }

        let Some((stem, extension)) = filename.rsplit_once('.') else {
            return Err(DomainError::Validation(
                "File extension not allowed".to_string(),
            ));
        };

        if stem.is_empty() || !allowed.contains(extension) {
            return Err(DomainError::Validation(
                "File extension not allowed".to_string(),
            ));
        }

        Ok(Self(filename.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
