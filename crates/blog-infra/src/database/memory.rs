//! In-memory blog repository - used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::error::RepoError;
use blog_core::ports::BlogRepository;
use blog_core::{BlogId, BlogPost, NewBlogPost};

/// In-memory repository backed by an insertion-ordered vector.
///
/// Note: Data is lost on process restart.
pub struct InMemoryBlogRepository {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let post = post.into_post(BlogId::generate(), Utc::now());
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_by_id(&self, id: BlogId) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(heading: &str) -> NewBlogPost {
        NewBlogPost::new(heading, "content", "memory://images/1", vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let repo = InMemoryBlogRepository::new();
        let a = repo.insert(new_post("a")).await.unwrap();
        let b = repo.insert(new_post("b")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryBlogRepository::new();
        for heading in ["first", "second", "third"] {
            repo.insert(new_post(heading)).await.unwrap();
        }

        let headings: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.heading)
            .collect();
        assert_eq!(headings, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryBlogRepository::new();
        let saved = repo.insert(new_post("hello")).await.unwrap();

        assert_eq!(repo.find_by_id(saved.id).await.unwrap(), Some(saved));
        assert_eq!(repo.find_by_id(BlogId::generate()).await.unwrap(), None);
    }
}
