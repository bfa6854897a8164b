use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{BlobError, BlobResult, BlobStore};

/// In-memory blob store for dev/test
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> BlobResult<()> {
        self.blobs
            .lock()
            .expect("blob store lock poisoned")
            .insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> BlobResult<Vec<u8>> {
        self.blobs
            .lock()
            .expect("blob store lock poisoned")
            .get(key)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant_scoped_key;
    use uuid::Uuid;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemoryBlobStore::new();
        store.put("t/1", b"hello".to_vec()).await.unwrap();

        assert_eq!(store.get("t/1").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let store = InMemoryBlobStore::new();

        assert!(matches!(
            store.get("absent").await,
            Err(BlobError::NotFound(_))
        ));
    }

    #[test]
    fn keys_are_scoped_by_tenant() {
        let tenant = Uuid::new_v4();
        let key = tenant_scoped_key(tenant);

        assert!(key.starts_with(&format!("{}/", tenant)));
    }
}
