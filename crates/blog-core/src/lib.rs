//! # Blog Core
//!
//! The domain layer of the blog API.
//! Holds the blog post entity, its required-field rules and the ports that
//! storage and persistence adapters implement. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{BlogDraft, BlogId, BlogPost, NewBlogPost};
pub use error::{DomainError, RepoError};
