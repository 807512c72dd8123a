use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use tokio::sync::RwLock;

use crate::application::ports::{ByteStream, StagingStore, StagingStoreError};
use crate::domain::StoragePath;

/// Staging store for tests; keys are the full staged paths.
#[derive(Default)]
pub struct InMemoryStagingStore {
    objects: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryStagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn paths(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }
}

#[async_trait::async_trait]
impl StagingStore for InMemoryStagingStore {
    async fn stage(
        &self,
        path: &StoragePath,
        body: ByteStream<'_>,
    ) -> Result<u64, StagingStoreError> {
        let data = body
            .try_fold(BytesMut::new(), |mut acc, part| async move {
                acc.extend_from_slice(&part);
                Ok(acc)
            })
            .await?
            .freeze();
        let written = data.len() as u64;
        self.objects.write().await.insert(path.to_string(), data);
        Ok(written)
    }

    async fn read(&self, path: &StoragePath) -> Result<Bytes, StagingStoreError> {
        self.objects
            .read()
            .await
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| StagingStoreError::NotFound(path.to_string()))
    }

    async fn discard(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        self.objects.write().await.remove(path.as_str());
        Ok(())
    }
}
