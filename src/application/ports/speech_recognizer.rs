use async_trait::async_trait;

use super::audio_decoder::{AudioDecoderError, DecodedAudio};

/// Bridge to the external speech-recognition capability.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn recognize(&self, audio: &DecodedAudio) -> Result<String, TranscriptionError>;
}

/// Classified outcome of a failed transcription.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptionError {
    #[error("speech could not be resolved to text")]
    Unintelligible,
    #[error("recognition engine unavailable: {0}")]
    EngineUnavailable(String),
    #[error("transcription failed: {0}")]
    Internal(String),
}

impl From<AudioDecoderError> for TranscriptionError {
    fn from(err: AudioDecoderError) -> Self {
        Self::Internal(err.to_string())
    }
}
