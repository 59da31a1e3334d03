use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::SpeechRecognizer;
use crate::presentation::config::{RecognizerProviderSetting, RecognizerSettings};

use super::google_cloud_recognizer::GoogleCloudRecognizer;
use super::google_web_recognizer::GoogleWebRecognizer;
use super::mock_recognizer::MockSpeechRecognizer;

#[derive(Debug, thiserror::Error)]
pub enum RecognizerConfigError {
    #[error("API key required for {0} recognizer")]
    MissingApiKey(&'static str),
    #[error("http client: {0}")]
    Client(String),
}

pub struct RecognizerFactory;

impl RecognizerFactory {
    pub fn create(
        settings: &RecognizerSettings,
    ) -> Result<Arc<dyn SpeechRecognizer>, RecognizerConfigError> {
        let timeout = Duration::from_secs(settings.timeout_seconds);
        let base_url = settings.base_url.as_deref();

        match settings.provider {
            RecognizerProviderSetting::GoogleCloud => {
                let key = api_key(settings, "google_cloud")?;
                let recognizer =
                    GoogleCloudRecognizer::new(base_url, key, &settings.language, timeout)?;
                Ok(Arc::new(recognizer))
            }
            RecognizerProviderSetting::GoogleWeb => {
                let key = api_key(settings, "google_web")?;
                let recognizer =
                    GoogleWebRecognizer::new(base_url, key, &settings.language, timeout)?;
                Ok(Arc::new(recognizer))
            }
            RecognizerProviderSetting::Mock => {
                tracing::warn!("Using mock speech recognizer, transcripts are canned");
                Ok(Arc::new(MockSpeechRecognizer::with_transcript(
                    settings.mock_transcript.clone(),
                )))
            }
        }
    }
}

fn api_key<'a>(
    settings: &'a RecognizerSettings,
    provider: &'static str,
) -> Result<&'a str, RecognizerConfigError> {
    settings
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(RecognizerConfigError::MissingApiKey(provider))
}
