use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::ports::{StagingStore, StagingStoreError, TranscriptionError};
use crate::domain::{AudioFormat, StagingName, UploadId};

use super::transcription_service::TranscriptionService;

/// Stages an upload, transcribes it and removes the staged copy again.
pub struct UploadService {
    staging_store: Arc<dyn StagingStore>,
    transcription_service: Arc<TranscriptionService>,
}

impl UploadService {
    pub fn new(
        staging_store: Arc<dyn StagingStore>,
        transcription_service: Arc<TranscriptionService>,
    ) -> Self {
        Self {
            staging_store,
            transcription_service,
        }
    }

    #[tracing::instrument(skip(self, stream))]
    pub async fn stage_and_transcribe(
        &self,
        client_filename: &str,
        format: AudioFormat,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<String, UploadFailure> {
        let upload_id = UploadId::new();
        let name = StagingName::new(&upload_id, client_filename, format);
        let cleanup = StagingCleanup::new(Arc::clone(&self.staging_store), name.clone());

        let result = match self.staging_store.store(&name, stream).await {
            Ok(staged) => {
                tracing::debug!(
                    staging_name = %staged.name,
                    bytes = staged.size_bytes,
                    "Upload staged"
                );
                self.transcription_service
                    .transcribe_file(&staged.path, format)
                    .await
                    .map_err(UploadFailure::Transcription)
            }
            Err(StagingStoreError::TooLarge { limit }) => {
                tracing::warn!(limit, "Upload rejected for exceeding size limit");
                Err(UploadFailure::TooLarge { limit })
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to stage upload");
                Err(UploadFailure::Transcription(TranscriptionError::Internal(
                    "failed to stage upload".to_string(),
                )))
            }
        };

        cleanup.run().await;

        result
    }
}

/// Removes a staged upload once the request is done with it.
///
/// If the request future is dropped before `run` (client disconnect), the
/// delete is spawned onto the runtime instead.
struct StagingCleanup {
    store: Arc<dyn StagingStore>,
    name: Option<StagingName>,
}

impl StagingCleanup {
    fn new(store: Arc<dyn StagingStore>, name: StagingName) -> Self {
        Self {
            store,
            name: Some(name),
        }
    }

    async fn run(mut self) {
        if let Some(name) = self.name.take() {
            discard(self.store.as_ref(), &name).await;
        }
    }
}

impl Drop for StagingCleanup {
    fn drop(&mut self) {
        let Some(name) = self.name.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(staging_name = %name, "Request cancelled, removing staged upload");
                let store = Arc::clone(&self.store);
                handle.spawn(async move {
                    discard(store.as_ref(), &name).await;
                });
            }
            Err(_) => {
                tracing::warn!(staging_name = %name, "No runtime to remove staged upload");
            }
        }
    }
}

async fn discard(store: &dyn StagingStore, name: &StagingName) {
    match store.delete(name).await {
        Ok(()) => tracing::debug!(staging_name = %name, "Staged upload removed"),
        Err(e) => {
            tracing::warn!(staging_name = %name, error = %e, "Failed to remove staged upload")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadFailure {
    #[error("upload exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}
