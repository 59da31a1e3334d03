use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::DEFAULT_RECOGNITION_TIMEOUT;

use super::environment::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub upload: UploadSettings,
    pub recognizer: RecognizerSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub directory: PathBuf,
    pub max_upload_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uploads"),
            max_upload_bytes: 25 * 1024 * 1024,
            allowed_extensions: ["wav", "mp3", "ogg", "flac"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerProviderSetting {
    GoogleCloud,
    GoogleWeb,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecognizerSettings {
    pub provider: RecognizerProviderSetting,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub language: String,
    pub timeout_seconds: u64,
    pub mock_transcript: String,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            provider: RecognizerProviderSetting::GoogleCloud,
            api_key: None,
            base_url: None,
            language: "en-US".to_string(),
            timeout_seconds: DEFAULT_RECOGNITION_TIMEOUT.as_secs(),
            mock_transcript: "hello world".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub json: bool,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{environment}` and `APP_*` variables.
    ///
    /// Nested keys use a double underscore, e.g. `APP_SERVER__PORT=8080` or
    /// `APP_UPLOAD__ALLOWED_EXTENSIONS=wav,flac`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("appsettings.{}", environment.as_str().to_lowercase());

        Config::builder()
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("upload.allowed_extensions")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
