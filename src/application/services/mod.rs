mod transcription_service;
mod upload_service;

pub use transcription_service::{DEFAULT_RECOGNITION_TIMEOUT, TranscriptionService};
pub use upload_service::{UploadFailure, UploadService};
