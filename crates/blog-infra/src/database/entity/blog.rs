//! Blog entity for SeaORM.

use sea_orm::{FromJsonQueryResult, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use blog_core::{BlogId, BlogPost, NewBlogPost};

/// Hashtags stored as a JSONB array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Hashtags(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub heading: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub image: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub hashtags: Hashtags,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain BlogPost.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: BlogId::from(model.id),
            heading: model.heading,
            content: model.content,
            image: model.image,
            hashtags: model.hashtags.0,
            created_at: model.created_at.into(),
        }
    }
}

impl ActiveModel {
    /// Build the row for a new post with a freshly assigned id.
    pub fn for_insert(post: NewBlogPost) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Set(BlogId::generate().as_uuid()),
            heading: Set(post.heading().to_owned()),
            content: Set(post.content().to_owned()),
            image: Set(post.image().to_owned()),
            hashtags: Set(Hashtags(post.hashtags().to_vec())),
            created_at: Set(now.into()),
        }
    }
}
