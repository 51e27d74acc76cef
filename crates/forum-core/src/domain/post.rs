use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Post entity - a forum post owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    /// User name of the author. Never changes after creation.
    pub owner: String,
    pub image: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a post that has not been persisted yet.
///
/// The id and creation timestamp are assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub owner: String,
    pub image: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
}

impl NewPost {
    /// Every text field is mandatory.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("image", &self.image),
            ("title", &self.title),
            ("subtitle", &self.subtitle),
            ("content", &self.content),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidArgument(format!("{name} is required")));
            }
        }

        Ok(())
    }
}

/// Client-supplied post fields. The owner is never part of the draft; it
/// comes from the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub image: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
}

impl PostDraft {
    pub fn with_owner(self, owner: &str) -> NewPost {
        NewPost {
            owner: owner.to_string(),
            image: self.image,
            title: self.title,
            subtitle: self.subtitle,
            content: self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            image: "https://img.example/1.jpg".to_string(),
            title: "title".to_string(),
            subtitle: "subtitle".to_string(),
            content: "content".to_string(),
        }
    }

    #[test]
    fn test_with_owner_sets_owner() {
        let post = draft().with_owner("alice");
        assert_eq!(post.owner, "alice");
        assert_eq!(post.title, "title");
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut d = draft();
        d.subtitle = "   ".to_string();
        let err = d.with_owner("alice").validate().unwrap_err();
        assert_eq!(err.to_string(), "subtitle is required");
    }
}
