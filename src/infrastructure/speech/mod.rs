mod google_cloud_recognizer;
mod google_web_recognizer;
mod mock_recognizer;
pub mod pcm;
mod recognizer_factory;
mod upstream_error;

pub use google_cloud_recognizer::GoogleCloudRecognizer;
pub use google_web_recognizer::{GoogleWebRecognizer, parse_web_speech_body};
pub use mock_recognizer::MockSpeechRecognizer;
pub use recognizer_factory::{RecognizerConfigError, RecognizerFactory};
