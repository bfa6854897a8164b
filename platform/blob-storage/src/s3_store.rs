use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::{BlobError, BlobResult, BlobStore};

/// Production blob store over an S3-compatible bucket
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a store from ambient AWS configuration (env/instance profile)
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> BlobResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| BlobError::PutError(e.to_string()))?;

        tracing::debug!(bucket = %self.bucket, key = %key, "blob stored");
        Ok(())
    }

    async fn get(&self, key: &str) -> BlobResult<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let msg = e.to_string();
                // The SDK surfaces a missing key as a service error; treat any
                // NoSuchKey as NotFound so callers can distinguish it.
                if msg.contains("NoSuchKey") {
                    BlobError::NotFound(key.to_string())
                } else {
                    BlobError::GetError(msg)
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| BlobError::GetError(e.to_string()))?;

        Ok(bytes.into_bytes().to_vec())
    }
}
