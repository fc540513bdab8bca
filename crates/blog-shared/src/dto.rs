//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::BlogPost;

/// A blog post as returned by every blog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub heading: String,
    pub content: String,
    pub image: String,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BlogPost> for BlogResponse {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.as_uuid(),
            heading: post.heading,
            content: post.content,
            image: post.image,
            hashtags: post.hashtags,
            created_at: post.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::{BlogId, NewBlogPost};

    #[test]
    fn test_blog_response_shape() {
        let id = BlogId::generate();
        let post = NewBlogPost::new("Hello", "World", "https://img/1.png", vec!["a".into()])
            .unwrap()
            .into_post(id, Utc::now());

        let json = serde_json::to_value(BlogResponse::from(post)).unwrap();

        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["heading"], "Hello");
        assert_eq!(json["content"], "World");
        assert_eq!(json["image"], "https://img/1.png");
        assert_eq!(json["hashtags"], serde_json::json!(["a"]));
        assert!(json["createdAt"].is_string());
    }
}
