//! Blog persistence - PostgreSQL and in-memory repositories.

mod connections;
mod memory;
mod unavailable;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use connections::DatabaseConfig;
pub use memory::InMemoryBlogRepository;
pub use unavailable::UnavailableBlogRepository;

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresBlogRepository;
