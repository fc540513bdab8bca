//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod storage;

pub use repository::BlogRepository;
pub use storage::{ImageStore, ResourceType, StorageError, StoredImage};
