//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the database and object storage integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `cloudinary` - Cloudinary object storage via reqwest

pub mod database;
pub mod storage;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryBlogRepository, UnavailableBlogRepository};
pub use storage::{CloudinaryConfig, InMemoryImageStore};

#[cfg(feature = "postgres")]
pub use database::PostgresBlogRepository;

#[cfg(feature = "cloudinary")]
pub use storage::CloudinaryImageStore;
