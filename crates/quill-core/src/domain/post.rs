use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum number of characters in a post title.
pub const TITLE_MAX_CHARS: usize = 850;

/// Maximum number of characters in a post body.
pub const BODY_MAX_CHARS: usize = 300;

/// Post entity - a blog entry as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<FixedOffset>,
    pub img_name: Option<String>,
}

/// The editable part of a post. Construction validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    title: String,
    body: String,
}

impl PostContent {
    /// Validate a title/body pair.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let body = body.into();

        if title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "Title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }
        if body.trim().is_empty() {
            return Err(DomainError::Validation("Body is required".to_string()));
        }
        if body.chars().count() > BODY_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "Body must be at most {BODY_MAX_CHARS} characters"
            )));
        }

        Ok(Self { title, body })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.body)
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: PostContent,
    pub created_at: DateTime<FixedOffset>,
    pub img_name: Option<String>,
}

impl NewPost {
    /// Create a new post stamped with the current time in `offset`.
    ///
    /// The clock is read here, once per post, so every row gets its own
    /// creation time.
    pub fn new(content: PostContent, img_name: Option<String>, offset: FixedOffset) -> Self {
        Self {
            content,
            created_at: Utc::now().with_timezone(&offset),
            img_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_accepts_limits() {
        let title = "t".repeat(TITLE_MAX_CHARS);
        let body = "b".repeat(BODY_MAX_CHARS);
        let content = PostContent::new(title.clone(), body.clone()).unwrap();
        assert_eq!(content.title(), title);
        assert_eq!(content.body(), body);
    }

    #[test]
    fn test_content_rejects_blank_and_oversized() {
        assert!(PostContent::new("  ", "body").is_err());
        assert!(PostContent::new("title", "").is_err());
        assert!(PostContent::new("t".repeat(TITLE_MAX_CHARS + 1), "body").is_err());
        assert!(PostContent::new("title", "b".repeat(BODY_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 300 three-byte characters is still within the body limit.
        let body = "あ".repeat(BODY_MAX_CHARS);
        assert!(PostContent::new("タイトル", body).is_ok());
    }

    #[test]
    fn test_new_post_uses_offset_and_fresh_clock() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let content = PostContent::new("T", "B").unwrap();

        let first = NewPost::new(content.clone(), None, tokyo);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = NewPost::new(content, Some("a.png".to_string()), tokyo);

        assert_eq!(first.created_at.offset().local_minus_utc(), 9 * 3600);
        assert!(second.created_at > first.created_at);
        assert_eq!(second.img_name.as_deref(), Some("a.png"));
    }
}
