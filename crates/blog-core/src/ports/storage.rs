//! Object storage port.

use std::fmt;

use async_trait::async_trait;

/// Resource-type hint passed to the storage provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceType {
    /// Let the provider detect the type from the bytes.
    #[default]
    Auto,
    Image,
    Video,
    Raw,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Auto => "auto",
            ResourceType::Image => "image",
            ResourceType::Video => "video",
            ResourceType::Raw => "raw",
        }
    }

    /// Parse the type reported back by a provider. Unknown values map to `Raw`.
    pub fn from_provider(value: &str) -> Self {
        match value {
            "image" => ResourceType::Image,
            "video" => ResourceType::Video,
            "auto" => ResourceType::Auto,
            _ => ResourceType::Raw,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an object held by the storage provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Durable HTTPS URL served by the provider.
    pub secure_url: String,
    /// Provider-side identifier, needed to delete the object again.
    pub public_id: String,
    /// Type the provider detected on upload.
    pub resource_type: ResourceType,
}

/// Image store trait - abstraction over object storage backends.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload raw bytes and return where they ended up.
    async fn upload(
        &self,
        data: Vec<u8>,
        hint: ResourceType,
    ) -> Result<StoredImage, StorageError>;

    /// Remove a previously uploaded object.
    async fn delete(&self, image: &StoredImage) -> Result<(), StorageError>;
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Provider rejected request ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Storage misconfigured: {0}")]
    Configuration(String),
}
