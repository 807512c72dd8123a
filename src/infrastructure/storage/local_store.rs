use std::path::PathBuf;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{ByteStream, StagingStore, StagingStoreError};
use crate::domain::StoragePath;

/// Staging directory on local disk, driven through `object_store` so a bucket
/// backend can replace it without touching callers.
pub struct LocalStagingStore {
    fs: LocalFileSystem,
}

impl LocalStagingStore {
    /// Creates `root` when missing.
    pub fn new(root: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&root)
            .map_err(|e| StagingStoreError::Backend(format!("{}: {e}", root.display())))?;
        let fs = LocalFileSystem::new_with_prefix(&root)?;
        Ok(Self { fs })
    }

    fn object_path(path: &StoragePath) -> ObjectPath {
        ObjectPath::from(path.as_str())
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    #[tracing::instrument(skip(self, body), fields(file = %path.file_name()))]
    async fn stage(
        &self,
        path: &StoragePath,
        mut body: ByteStream<'_>,
    ) -> Result<u64, StagingStoreError> {
        let mut upload = self.fs.put_multipart(&Self::object_path(path)).await?;
        let mut written = 0u64;

        loop {
            let part = match body.try_next().await {
                Ok(Some(part)) => part,
                Ok(None) => break,
                Err(e) => {
                    upload.abort().await.ok();
                    return Err(e.into());
                }
            };
            written += part.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(part)).await {
                upload.abort().await.ok();
                return Err(e.into());
            }
        }

        upload.complete().await?;
        tracing::debug!(bytes = written, "Upload staged");
        Ok(written)
    }

    async fn read(&self, path: &StoragePath) -> Result<Bytes, StagingStoreError> {
        let object = self.fs.get(&Self::object_path(path)).await?;
        Ok(object.bytes().await?)
    }

    async fn discard(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        match self.fs.delete(&Self::object_path(path)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl From<object_store::Error> for StagingStoreError {
    fn from(error: object_store::Error) -> Self {
        match error {
            object_store::Error::NotFound { path, .. } => Self::NotFound(path),
            other => Self::Backend(other.to_string()),
        }
    }
}
