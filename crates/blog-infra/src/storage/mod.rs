//! Object storage implementations - Cloudinary and in-memory fallback.

mod config;
mod memory;

#[cfg(feature = "cloudinary")]
mod cloudinary;

pub use config::CloudinaryConfig;
pub use memory::InMemoryImageStore;

#[cfg(feature = "cloudinary")]
pub use cloudinary::CloudinaryImageStore;
