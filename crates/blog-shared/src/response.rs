//! Error payload returned by every failing endpoint.

use serde::{Deserialize, Serialize};

/// `{ "error": "<message>" }`
///
/// Messages are short and generic; internal detail stays in the server logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn image_required() -> Self {
        Self::new("Image is required")
    }

    pub fn blog_not_found() -> Self {
        Self::new("Blog not found")
    }
}
