use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::TranscriptionError;
use crate::application::services::UploadFailure;
use crate::domain::UploadRejection;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every way a transcription request can fail, as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NoAudioFile,
    Rejected(UploadRejection),
    TooLarge,
    Transcription(TranscriptionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoAudioFile | Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Transcription(TranscriptionError::Unintelligible) => StatusCode::BAD_REQUEST,
            Self::Transcription(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::NoAudioFile => "No audio file provided".to_string(),
            Self::Rejected(rejection) => rejection.to_string(),
            Self::TooLarge => "File too large".to_string(),
            Self::Transcription(TranscriptionError::Unintelligible) => {
                "Could not understand audio".to_string()
            }
            Self::Transcription(TranscriptionError::EngineUnavailable(detail)) => {
                format!("Google Speech API error: {}", detail)
            }
            Self::Transcription(TranscriptionError::Internal(detail)) => {
                format!("An error occurred: {}", detail)
            }
        }
    }
}

impl From<UploadRejection> for ApiError {
    fn from(rejection: UploadRejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl From<UploadFailure> for ApiError {
    fn from(failure: UploadFailure) -> Self {
        match failure {
            UploadFailure::TooLarge { .. } => Self::TooLarge,
            UploadFailure::Transcription(err) => Self::Transcription(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}
