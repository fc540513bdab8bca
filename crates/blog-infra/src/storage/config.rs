//! Cloudinary account settings.

use blog_core::ports::{ResourceType, StorageError};

pub(crate) const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Cloudinary account configuration.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Scheme and host of the upload API.
    pub api_base: String,
    /// Optional folder uploads are placed in.
    pub folder: Option<String>,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            folder: None,
        }
    }

    /// Parse a `cloudinary://<api_key>:<api_secret>@<cloud_name>` URL.
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let invalid = || {
            StorageError::Configuration(
                "expected cloudinary://<api_key>:<api_secret>@<cloud_name>".to_string(),
            )
        };

        let rest = url.strip_prefix("cloudinary://").ok_or_else(invalid)?;
        let (credentials, cloud_name) = rest.rsplit_once('@').ok_or_else(invalid)?;
        let (api_key, api_secret) = credentials.split_once(':').ok_or_else(invalid)?;

        if cloud_name.is_empty() || api_key.is_empty() || api_secret.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(cloud_name, api_key, api_secret))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    #[cfg_attr(not(feature = "cloudinary"), allow(dead_code))]
    pub(crate) fn endpoint(&self, resource_type: ResourceType, action: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/{}",
            self.api_base, self.cloud_name, resource_type, action
        )
    }
}
