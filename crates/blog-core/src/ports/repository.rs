use async_trait::async_trait;

use crate::domain::{BlogId, BlogPost, NewBlogPost};
use crate::error::RepoError;

/// Blog post persistence.
///
/// Posts are append-only: there is no update or delete.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Persist a new post, assigning its identifier.
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError>;

    /// All posts in the store's native (insertion) order.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Find a post by its identifier.
    async fn find_by_id(&self, id: BlogId) -> Result<Option<BlogPost>, RepoError>;
}
