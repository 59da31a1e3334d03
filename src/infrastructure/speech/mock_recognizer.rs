use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::ports::{DecodedAudio, SpeechRecognizer, TranscriptionError};

#[derive(Debug, Clone)]
enum MockOutcome {
    Transcript(String),
    Unintelligible,
    Unavailable(String),
    Hang,
}

/// Recognizer with a fixed outcome, for scaffold runs and tests.
#[derive(Debug)]
pub struct MockSpeechRecognizer {
    outcome: MockOutcome,
    calls: AtomicUsize,
}

impl MockSpeechRecognizer {
    fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_transcript(text: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Transcript(text.into()))
    }

    pub fn unintelligible() -> Self {
        Self::with_outcome(MockOutcome::Unintelligible)
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Unavailable(detail.into()))
    }

    /// Never answers; exercises the recognition timeout.
    pub fn hanging() -> Self {
        Self::with_outcome(MockOutcome::Hang)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechRecognizer for MockSpeechRecognizer {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn recognize(&self, _audio: &DecodedAudio) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            MockOutcome::Transcript(text) => Ok(text.clone()),
            MockOutcome::Unintelligible => Err(TranscriptionError::Unintelligible),
            MockOutcome::Unavailable(detail) => {
                Err(TranscriptionError::EngineUnavailable(detail.clone()))
            }
            MockOutcome::Hang => futures::future::pending().await,
        }
    }
}
