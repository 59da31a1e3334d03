use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::StagingName;

/// An upload written to the staging area, owned by a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: StagingName,
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    async fn store(
        &self,
        name: &StagingName,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<StagedFile, StagingStoreError>;

    async fn delete(&self, name: &StagingName) -> Result<(), StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("upload exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
