//! # Blob Storage Abstraction
//!
//! Stores bill attachment files in an S3-compatible object store, addressed
//! by an opaque key the owning record persists. Keys are tenant-scoped
//! (`{tenant_id}/{uuid}`) so a tenant's attachments can never collide with,
//! or be addressed as, another tenant's.
//!
//! ## Implementations
//!
//! - **S3BlobStore**: Production implementation over an S3-compatible bucket
//! - **InMemoryBlobStore**: Test/dev implementation backed by a map

mod inmemory_store;
mod s3_store;

pub use inmemory_store::InMemoryBlobStore;
pub use s3_store::S3BlobStore;

use async_trait::async_trait;
use uuid::Uuid;

/// Errors that can occur against the blob store
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("blob not found: {0}")]
    NotFound(String),

    #[error("failed to store blob: {0}")]
    PutError(String),

    #[error("failed to read blob: {0}")]
    GetError(String),
}

/// Result type for blob operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Build a fresh tenant-scoped blob key
pub fn tenant_scoped_key(tenant_id: Uuid) -> String {
    format!("{}/{}", tenant_id, Uuid::new_v4())
}

/// Core blob store abstraction
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob under the given key, overwriting any previous content
    async fn put(&self, key: &str, bytes: Vec<u8>) -> BlobResult<()>;

    /// Read a blob back as bytes
    ///
    /// # Returns
    /// * `Ok(bytes)` if the blob exists
    /// * `Err(BlobError::NotFound)` if no blob is stored under the key
    async fn get(&self, key: &str) -> BlobResult<Vec<u8>>;
}
