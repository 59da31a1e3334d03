use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{DecodedAudio, SpeechRecognizer, TranscriptionError};

use super::pcm::to_i16_le_bytes;
use super::recognizer_factory::RecognizerConfigError;
use super::upstream_error::{connection_failed, request_failed};

pub const DEFAULT_BASE_URL: &str = "https://speech.googleapis.com";

/// Google Cloud Speech-to-Text v1 synchronous `speech:recognize`.
pub struct GoogleCloudRecognizer {
    client: Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl GoogleCloudRecognizer {
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
            "{}/v1/speech:recognize",
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

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize, Default)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechRecognitionResult>,
}

#[derive(Deserialize)]
struct SpeechRecognitionResult {
    #[serde(default)]
    alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Deserialize)]
struct SpeechRecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

#[async_trait]
impl SpeechRecognizer for GoogleCloudRecognizer {
    fn name(&self) -> &'static str {
        "google_cloud"
    }

    async fn recognize(&self, audio: &DecodedAudio) -> Result<String, TranscriptionError> {
        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: audio.sample_rate,
                language_code: &self.language,
            },
            audio: RecognitionAudio {
                content: general_purpose::STANDARD.encode(to_i16_le_bytes(&audio.samples)),
            },
        };

        tracing::debug!(
            language = %self.language,
            duration_secs = audio.duration_secs(),
            "Sending audio to Google Cloud Speech"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(connection_failed)?;

        if !response.status().is_success() {
            return Err(request_failed(response).await);
        }

        let result: RecognizeResponse = response.json().await.map_err(|e| {
            TranscriptionError::EngineUnavailable(format!(
                "unexpected recognition response: {}",
                e.without_url()
            ))
        })?;

        let transcript = result
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|alt| alt.transcript.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.is_empty() {
            return Err(TranscriptionError::Unintelligible);
        }

        tracing::info!(
            chars = transcript.len(),
            "Google Cloud Speech recognition completed"
        );

        Ok(transcript)
    }
}
