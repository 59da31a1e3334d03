use std::sync::Arc;
use std::time::Duration;

use transcribe_gateway::application::ports::{
    AudioDecoder, AudioDecoderError, DecodedAudio, TranscriptionError,
};
use transcribe_gateway::application::services::TranscriptionService;
use transcribe_gateway::domain::AudioFormat;
use transcribe_gateway::infrastructure::speech::MockSpeechRecognizer;

struct FixedDecoder(Vec<f32>);

impl AudioDecoder for FixedDecoder {
    fn decode(&self, _data: &[u8], _format: AudioFormat) -> Result<DecodedAudio, AudioDecoderError> {
        Ok(DecodedAudio::new(self.0.clone(), 16_000))
    }
}

struct FailingDecoder;

impl AudioDecoder for FailingDecoder {
    fn decode(&self, _data: &[u8], _format: AudioFormat) -> Result<DecodedAudio, AudioDecoderError> {
        Err(AudioDecoderError::DecodingFailed("probe: bad header".to_string()))
    }
}

fn staged_file() -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
    std::fs::write(file.path(), b"bytes").unwrap();
    file
}

fn service(
    decoder: impl AudioDecoder + 'static,
    recognizer: Arc<MockSpeechRecognizer>,
    timeout: Duration,
) -> TranscriptionService {
    TranscriptionService::new(Arc::new(decoder), recognizer, timeout)
}

#[tokio::test]
async fn given_recognizable_audio_when_transcribing_then_returns_trimmed_text() {
    let recognizer = Arc::new(MockSpeechRecognizer::with_transcript("  hello world \n"));
    let svc = service(FixedDecoder(vec![0.1; 1600]), recognizer.clone(), Duration::from_secs(5));
    let file = staged_file();

    let result = svc.transcribe_file(file.path(), AudioFormat::Wav).await;

    assert_eq!(result, Ok("hello world".to_string()));
    assert_eq!(recognizer.call_count(), 1);
}

#[tokio::test]
async fn given_blank_transcript_when_transcribing_then_returns_unintelligible() {
    let recognizer = Arc::new(MockSpeechRecognizer::with_transcript("   "));
    let svc = service(FixedDecoder(vec![0.1; 1600]), recognizer, Duration::from_secs(5));
    let file = staged_file();

    let result = svc.transcribe_file(file.path(), AudioFormat::Wav).await;

    assert_eq!(result, Err(TranscriptionError::Unintelligible));
}

#[tokio::test]
async fn given_empty_decoded_audio_when_transcribing_then_skips_recognizer() {
    let recognizer = Arc::new(MockSpeechRecognizer::with_transcript("never"));
    let svc = service(FixedDecoder(Vec::new()), recognizer.clone(), Duration::from_secs(5));
    let file = staged_file();

    let result = svc.transcribe_file(file.path(), AudioFormat::Wav).await;

    assert_eq!(result, Err(TranscriptionError::Unintelligible));
    assert_eq!(recognizer.call_count(), 0);
}

#[tokio::test]
async fn given_decoder_failure_when_transcribing_then_returns_internal_error() {
    let recognizer = Arc::new(MockSpeechRecognizer::with_transcript("never"));
    let svc = service(FailingDecoder, recognizer, Duration::from_secs(5));
    let file = staged_file();

    let result = svc.transcribe_file(file.path(), AudioFormat::Mp3).await;

    assert_eq!(
        result,
        Err(TranscriptionError::Internal(
            "audio decoding failed: probe: bad header".to_string()
        ))
    );
}

#[tokio::test]
async fn given_missing_staged_file_when_transcribing_then_returns_internal_error() {
    let recognizer = Arc::new(MockSpeechRecognizer::with_transcript("never"));
    let svc = service(FixedDecoder(vec![0.1; 10]), recognizer, Duration::from_secs(5));
    let dir = tempfile::TempDir::new().unwrap();

    let result = svc
        .transcribe_file(&dir.path().join("gone.wav"), AudioFormat::Wav)
        .await;

    assert!(matches!(result, Err(TranscriptionError::Internal(_))));
}

#[tokio::test]
async fn given_engine_error_when_transcribing_then_propagates_without_retry() {
    let recognizer = Arc::new(MockSpeechRecognizer::unavailable("status 503"));
    let svc = service(FixedDecoder(vec![0.1; 1600]), recognizer.clone(), Duration::from_secs(5));
    let file = staged_file();

    let result = svc.transcribe_file(file.path(), AudioFormat::Wav).await;

    assert_eq!(
        result,
        Err(TranscriptionError::EngineUnavailable("status 503".to_string()))
    );
    assert_eq!(recognizer.call_count(), 1);
}

#[tokio::test]
async fn given_hanging_engine_when_transcribing_then_times_out_as_unavailable() {
    let recognizer = Arc::new(MockSpeechRecognizer::hanging());
    let svc = service(FixedDecoder(vec![0.1; 1600]), recognizer, Duration::from_secs(1));
    let file = staged_file();

    let result = svc.transcribe_file(file.path(), AudioFormat::Wav).await;

    assert_eq!(
        result,
        Err(TranscriptionError::EngineUnavailable(
            "recognition request timed out after 1s".to_string()
        ))
    );
}
