//! Cloudinary image store.
//!
//! Uses the signed upload API: every request carries the API key, a unix
//! timestamp and a SHA-256 signature over the sorted request parameters
//! followed by the API secret.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use blog_core::ports::{ImageStore, ResourceType, StorageError, StoredImage};

use super::CloudinaryConfig;

/// Sign request parameters the way the Cloudinary API expects.
fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    resource_type: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Image store backed by Cloudinary.
pub struct CloudinaryImageStore {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn signed_params(
        &self,
        mut params: Vec<(&'static str, String)>,
    ) -> Vec<(&'static str, String)> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        params.push(("timestamp", timestamp));
        let signature = sign(&params, &self.config.api_secret);

        params.push(("api_key", self.config.api_key.clone()));
        params.push(("signature", signature));
        params.push(("signature_algorithm", "sha256".to_string()));
        params
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StorageError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(StorageError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| StorageError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn upload(
        &self,
        data: Vec<u8>,
        hint: ResourceType,
    ) -> Result<StoredImage, StorageError> {
        let mut params = Vec::new();
        if let Some(folder) = &self.config.folder {
            params.push(("folder", folder.clone()));
        }

        let size = data.len();
        let mut form = Form::new().part("file", Part::bytes(data).file_name("upload"));
        for (key, value) in self.signed_params(params) {
            form = form.text(key, value);
        }

        tracing::debug!(bytes = size, resource_type = %hint, "Uploading to Cloudinary");

        let response = self
            .client
            .post(self.config.endpoint(hint, "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let uploaded: UploadResponse = Self::read_json(response).await?;

        tracing::info!(public_id = %uploaded.public_id, "Image uploaded");

        Ok(StoredImage {
            secure_url: uploaded.secure_url,
            public_id: uploaded.public_id,
            resource_type: ResourceType::from_provider(&uploaded.resource_type),
        })
    }

    async fn delete(&self, image: &StoredImage) -> Result<(), StorageError> {
        let params = self.signed_params(vec![("public_id", image.public_id.clone())]);

        let response = self
            .client
            .post(self.config.endpoint(image.resource_type, "destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let destroyed: DestroyResponse = Self::read_json(response).await?;

        match destroyed.result.as_str() {
            "ok" | "not found" => {
                tracing::info!(public_id = %image.public_id, "Image deleted");
                Ok(())
            }
            other => Err(StorageError::InvalidResponse(format!(
                "unexpected destroy result: {other}"
            ))),
        }
    }
}
