use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{DecodedAudio, SpeechRecognizer, TranscriptionError};

use super::pcm::to_i16_be_bytes;
use super::recognizer_factory::RecognizerConfigError;
use super::upstream_error::{connection_failed, request_failed};

pub const DEFAULT_BASE_URL: &str = "http://www.google.com";

/// Keyed Chromium web-speech endpoint (`speech-api/v2`).
///
/// Raw `audio/l16` PCM is posted and the engine answers with newline-delimited
/// JSON objects, the first of which is usually an empty `{"result":[]}`.
pub struct GoogleWebRecognizer {
    client: Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl GoogleWebRecognizer {
    pub fn new(
        base_url: Option<&str>,
        api_key: &str,
        language: &str,
        timeout: Duration,
    ) -> Result<Self, RecognizerConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecognizerConfigError::Client(e.to_string()))?;

        let endpoint = format!(
            "{}/speech-api/v2/recognize",
            base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/')
        );

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            language: language.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct WebSpeechResponse {
    #[serde(default)]
    result: Vec<WebSpeechResult>,
}

#[derive(Deserialize)]
struct WebSpeechResult {
    #[serde(default)]
    alternative: Vec<WebSpeechAlternative>,
}

#[derive(Deserialize)]
struct WebSpeechAlternative {
    #[serde(default)]
    transcript: String,
    confidence: Option<f32>,
}

/// Picks the transcript from a newline-delimited web-speech response body.
pub fn parse_web_speech_body(body: &str) -> Result<String, TranscriptionError> {
    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parsed: WebSpeechResponse = serde_json::from_str(line).map_err(|e| {
            TranscriptionError::EngineUnavailable(format!("unexpected recognition response: {}", e))
        })?;

        let Some(first) = parsed.result.into_iter().next() else {
            continue;
        };

        let best = first
            .alternative
            .iter()
            .find(|alt| alt.confidence.is_some())
            .or_else(|| first.alternative.first())
            .map(|alt| alt.transcript.trim().to_string())
            .unwrap_or_default();

        if best.is_empty() {
            return Err(TranscriptionError::Unintelligible);
        }
        return Ok(best);
    }

    Err(TranscriptionError::Unintelligible)
}

#[async_trait]
impl SpeechRecognizer for GoogleWebRecognizer {
    fn name(&self) -> &'static str {
        "google_web"
    }

    async fn recognize(&self, audio: &DecodedAudio) -> Result<String, TranscriptionError> {
        let content_type = format!("audio/l16; rate={}", audio.sample_rate);

        tracing::debug!(
            language = %self.language,
            duration_secs = audio.duration_secs(),
            "Sending audio to Google web speech"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("client", "chromium"),
                ("lang", self.language.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(to_i16_be_bytes(&audio.samples))
            .send()
            .await
            .map_err(connection_failed)?;

        if !response.status().is_success() {
            return Err(request_failed(response).await);
        }

        let body = response.text().await.map_err(connection_failed)?;
        let transcript = parse_web_speech_body(&body)?;

        tracing::info!(
            chars = transcript.len(),
            "Google web speech recognition completed"
        );

        Ok(transcript)
    }
}
