use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Opaque blog post identifier, assigned once at insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(Uuid);

impl BlogId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for BlogId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BlogId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogId,
    pub heading: String,
    pub content: String,
    pub image: String,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The text half of a new post, validated before its image is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    heading: String,
    content: String,
    hashtags: Vec<String>,
}

impl BlogDraft {
    pub fn new(
        heading: impl Into<String>,
        content: impl Into<String>,
        hashtags: Vec<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            heading: required("Heading", heading.into())?,
            content: required("Content", content.into())?,
            hashtags,
        })
    }

    /// Complete the draft with the URL of its stored image.
    pub fn with_image(self, image: impl Into<String>) -> Result<NewBlogPost, DomainError> {
        Ok(NewBlogPost {
            heading: self.heading,
            content: self.content,
            image: required("Image", image.into())?,
            hashtags: self.hashtags,
        })
    }
}

/// A validated blog post that has not been persisted yet.
///
/// Only [`NewBlogPost::new`] and [`BlogDraft::with_image`] build one, so every
/// value that reaches a repository carries a non-empty heading, content and
/// image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    heading: String,
    content: String,
    image: String,
    hashtags: Vec<String>,
}

impl NewBlogPost {
    /// Construct and validate a new post.
    pub fn new(
        heading: impl Into<String>,
        content: impl Into<String>,
        image: impl Into<String>,
        hashtags: Vec<String>,
    ) -> Result<Self, DomainError> {
        BlogDraft::new(heading, content, hashtags)?.with_image(image)
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn hashtags(&self) -> &[String] {
        &self.hashtags
    }

    /// Attach the identity assigned by the store.
    pub fn into_post(self, id: BlogId, created_at: DateTime<Utc>) -> BlogPost {
        BlogPost {
            id,
            heading: self.heading,
            content: self.content,
            image: self.image,
            hashtags: self.hashtags,
            created_at,
        }
    }
}

fn required(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Split the comma-separated hashtag form field.
///
/// A missing or empty field yields no hashtags. Segments are kept verbatim.
pub fn parse_hashtags(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) if !raw.is_empty() => raw.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    }
}
