use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{StagedFile, StagingStore, StagingStoreError};
use crate::domain::StagingName;

/// Stages uploads as flat files inside a single upload directory.
pub struct LocalStagingStore {
    inner: Arc<LocalFileSystem>,
    max_upload_bytes: u64,
}

impl LocalStagingStore {
    pub fn new(base_path: PathBuf, max_upload_bytes: u64) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&base_path).map_err(StagingStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            max_upload_bytes,
        })
    }

    async fn abort(upload: &mut Box<dyn MultipartUpload>) {
        if let Err(e) = upload.abort().await {
            tracing::warn!(error = %e, "Failed to abort partial upload");
        }
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    async fn store(
        &self,
        name: &StagingName,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<StagedFile, StagingStoreError> {
        let store_path = StorePath::from(name.as_str());
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    Self::abort(&mut upload).await;
                    return Err(StagingStoreError::Io(e));
                }
            };

            total_bytes += bytes.len() as u64;
            if total_bytes > self.max_upload_bytes {
                Self::abort(&mut upload).await;
                return Err(StagingStoreError::TooLarge {
                    limit: self.max_upload_bytes,
                });
            }

            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                Self::abort(&mut upload).await;
                return Err(StagingStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        let path = self
            .inner
            .path_to_filesystem(&store_path)
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        Ok(StagedFile {
            name: name.clone(),
            path,
            size_bytes: total_bytes,
        })
    }

    async fn delete(&self, name: &StagingName) -> Result<(), StagingStoreError> {
        let store_path = StorePath::from(name.as_str());
        match self.inner.delete(&store_path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(StagingStoreError::DeleteFailed(e.to_string())),
        }
    }
}
