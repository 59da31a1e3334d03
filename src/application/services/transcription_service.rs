use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AudioDecoder, SpeechRecognizer, TranscriptionError};
use crate::domain::AudioFormat;

pub const DEFAULT_RECOGNITION_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a staged audio file into text with a single recognizer call.
pub struct TranscriptionService {
    decoder: Arc<dyn AudioDecoder>,
    recognizer: Arc<dyn SpeechRecognizer>,
    timeout: Duration,
}

impl TranscriptionService {
    pub fn new(
        decoder: Arc<dyn AudioDecoder>,
        recognizer: Arc<dyn SpeechRecognizer>,
        timeout: Duration,
    ) -> Self {
        Self {
            decoder,
            recognizer,
            timeout,
        }
    }

    #[tracing::instrument(skip(self, path), fields(recognizer = self.recognizer.name()))]
    pub async fn transcribe_file(
        &self,
        path: &Path,
        format: AudioFormat,
    ) -> Result<String, TranscriptionError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| TranscriptionError::Internal(format!("failed to read staged audio: {}", e)))?;

        tracing::debug!(bytes = data.len(), "Decoding staged audio");

        let decoder = Arc::clone(&self.decoder);
        let audio = tokio::task::spawn_blocking(move || decoder.decode(&data, format))
            .await
            .map_err(|e| TranscriptionError::Internal(format!("decoder task: {}", e)))??;

        if audio.is_empty() {
            tracing::info!("Decoded audio contains no samples");
            return Err(TranscriptionError::Unintelligible);
        }

        tracing::debug!(
            duration_secs = audio.duration_secs(),
            "Submitting audio to recognizer"
        );

        let text = tokio::time::timeout(self.timeout, self.recognizer.recognize(&audio))
            .await
            .map_err(|_| {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "Recognizer timed out");
                TranscriptionError::EngineUnavailable(format!(
                    "recognition request timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;

        let text = text.trim();
        if text.is_empty() {
            return Err(TranscriptionError::Unintelligible);
        }

        tracing::info!(chars = text.len(), "Transcription completed");

        Ok(text.to_string())
    }
}
