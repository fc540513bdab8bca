//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{BlogRepository, ImageStore};
use blog_infra::{InMemoryBlogRepository, InMemoryImageStore};

#[cfg(feature = "postgres")]
use blog_infra::UnavailableBlogRepository;

use crate::config::AppConfig;

/// Which adapters the state was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backends {
    pub database: &'static str,
    pub storage: &'static str,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub images: Arc<dyn ImageStore>,
    pub backends: Backends,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (blogs, database) = Self::init_repository(config).await;
        let (images, storage) = Self::init_image_store(config);

        tracing::info!(database, storage, "Application state initialized");

        Self {
            blogs,
            images,
            backends: Backends { database, storage },
        }
    }

    /// Assemble state from already-built adapters.
    #[cfg(test)]
    pub fn from_parts(blogs: Arc<dyn BlogRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            blogs,
            images,
            backends: Backends {
                database: "custom",
                storage: "custom",
            },
        }
    }

    #[cfg(feature = "postgres")]
    async fn init_repository(config: &AppConfig) -> (Arc<dyn BlogRepository>, &'static str) {
        use blog_infra::PostgresBlogRepository;
        use blog_infra::database::connect;
        use migration::{Migrator, MigratorTrait};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryBlogRepository::new()), "memory");
        };

        let conn = match connect(db_config).await {
            Ok(conn) => conn,
            Err(e) => {
                // Not fatal: the server still starts and blog calls fail with 500.
                tracing::error!("Failed to connect to database: {}", e);
                return (
                    Arc::new(UnavailableBlogRepository::new(e.to_string())),
                    "unavailable",
                );
            }
        };

        if config.auto_migrate {
            match Migrator::up(&conn, None).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::error!("Failed to apply migrations: {}", e),
            }
        }

        (Arc::new(PostgresBlogRepository::new(conn)), "postgres")
    }

    #[cfg(not(feature = "postgres"))]
    async fn init_repository(_config: &AppConfig) -> (Arc<dyn BlogRepository>, &'static str) {
        tracing::info!("Running without postgres feature - using in-memory repository");
        (Arc::new(InMemoryBlogRepository::new()), "memory")
    }

    #[cfg(feature = "cloudinary")]
    fn init_image_store(config: &AppConfig) -> (Arc<dyn ImageStore>, &'static str) {
        use blog_infra::CloudinaryImageStore;

        match config.cloudinary.clone() {
            Some(cloudinary) => {
                tracing::info!(cloud = %cloudinary.cloud_name, "Cloudinary image store configured");
                (Arc::new(CloudinaryImageStore::new(cloudinary)), "cloudinary")
            }
            None => {
                tracing::warn!(
                    "Cloudinary credentials not set. Images are kept in memory and are not served."
                );
                (Arc::new(InMemoryImageStore::new()), "memory")
            }
        }
    }

    #[cfg(not(feature = "cloudinary"))]
    fn init_image_store(_config: &AppConfig) -> (Arc<dyn ImageStore>, &'static str) {
        tracing::info!("Running without cloudinary feature - using in-memory image store");
        (Arc::new(InMemoryImageStore::new()), "memory")
    }
}
