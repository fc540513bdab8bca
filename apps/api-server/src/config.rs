//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::{CloudinaryConfig, DatabaseConfig};

/// Port used when `PORT` is unset.
const DEFAULT_PORT: u16 = 3000;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending schema migrations before serving.
    pub auto_migrate: bool,
    pub cloudinary: Option<CloudinaryConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let database = get("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: get("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: get("DB_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        });

        Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            database,
            auto_migrate: get("DB_AUTO_MIGRATE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            cloudinary: Self::parse_cloudinary(&get),
        }
    }

    /// Cloudinary credentials, from `CLOUDINARY_URL` or the three split
    /// `CLOUDINARY_*` variables.
    fn parse_cloudinary(get: &impl Fn(&str) -> Option<String>) -> Option<CloudinaryConfig> {
        let config = match get("CLOUDINARY_URL") {
            Some(url) => match CloudinaryConfig::from_url(&url) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Ignoring CLOUDINARY_URL: {}", e);
                    return None;
                }
            },
            None => CloudinaryConfig::new(
                get("CLOUDINARY_CLOUD_NAME")?,
                get("CLOUDINARY_API_KEY")?,
                get("CLOUDINARY_API_SECRET")?,
            ),
        };

        let config = match get("CLOUDINARY_API_BASE") {
            Some(base) => config.with_api_base(base),
            None => config,
        };

        Some(match get("CLOUDINARY_FOLDER") {
            Some(folder) => config.with_folder(folder),
            None => config,
        })
    }
}
