//! In-memory image store - used when no storage provider is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::ports::{ImageStore, ResourceType, StorageError, StoredImage};

/// Keeps uploaded bytes in a map keyed by public id.
///
/// Note: Data is lost on process restart, and the returned URLs are not
/// fetchable over HTTP.
pub struct InMemoryImageStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    failing: bool,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            failing: false,
        }
    }

    /// A store that rejects every upload, for exercising error paths.
    pub fn failing() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            failing: true,
        }
    }

    pub async fn contains(&self, public_id: &str) -> bool {
        self.objects.read().await.contains_key(public_id)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload(
        &self,
        data: Vec<u8>,
        hint: ResourceType,
    ) -> Result<StoredImage, StorageError> {
        if self.failing {
            return Err(StorageError::Provider {
                status: 503,
                message: "in-memory store is set to fail".to_string(),
            });
        }

        let public_id = Uuid::new_v4().simple().to_string();
        let resource_type = match hint {
            ResourceType::Auto => ResourceType::Image,
            other => other,
        };

        self.objects.write().await.insert(public_id.clone(), data);

        Ok(StoredImage {
            secure_url: format!("memory://images/{public_id}"),
            public_id,
            resource_type,
        })
    }

    async fn delete(&self, image: &StoredImage) -> Result<(), StorageError> {
        self.objects.write().await.remove(&image.public_id);
        Ok(())
    }
}
