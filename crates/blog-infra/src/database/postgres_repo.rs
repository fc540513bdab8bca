//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn, DbErr, EntityTrait, QueryOrder};

use blog_core::error::RepoError;
use blog_core::ports::BlogRepository;
use blog_core::{BlogId, BlogPost, NewBlogPost};

use super::entity::blog::{self, Entity as BlogEntity};

/// PostgreSQL blog repository.
pub struct PostgresBlogRepository {
    pub(crate) db: DbConn,
}

impl PostgresBlogRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> RepoError {
    match e {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => RepoError::Connection(e.to_string()),
        _ => {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let model = blog::ActiveModel::for_insert(post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(blog_id = %model.id, "Inserted blog");
        Ok(model.into())
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = BlogEntity::find()
            .order_by_asc(blog::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: BlogId) -> Result<Option<BlogPost>, RepoError> {
        let result = BlogEntity::find_by_id(id.as_uuid())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
