//! Domain entities - the core business objects.

mod blog;

pub use blog::{BlogDraft, BlogId, BlogPost, NewBlogPost, parse_hashtags};
