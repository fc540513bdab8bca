//! Repository used when the database could not be reached at startup.

use async_trait::async_trait;

use blog_core::error::RepoError;
use blog_core::ports::BlogRepository;
use blog_core::{BlogId, BlogPost, NewBlogPost};

/// Fails every call with [`RepoError::Connection`].
///
/// Lets the server keep accepting requests after a failed connect, with each
/// blog operation surfacing as a server error.
pub struct UnavailableBlogRepository {
    reason: String,
}

impl UnavailableBlogRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> RepoError {
        RepoError::Connection(self.reason.clone())
    }
}

#[async_trait]
impl BlogRepository for UnavailableBlogRepository {
    async fn insert(&self, _post: NewBlogPost) -> Result<BlogPost, RepoError> {
        Err(self.error())
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Err(self.error())
    }

    async fn find_by_id(&self, _id: BlogId) -> Result<Option<BlogPost>, RepoError> {
        Err(self.error())
    }
}
