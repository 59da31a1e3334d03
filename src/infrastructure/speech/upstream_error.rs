use serde::Deserialize;

use crate::application::ports::TranscriptionError;

#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Maps a transport failure without leaking the request URL (it carries the API key).
pub fn connection_failed(err: reqwest::Error) -> TranscriptionError {
    if err.is_timeout() {
        return TranscriptionError::EngineUnavailable("recognition request timed out".to_string());
    }
    TranscriptionError::EngineUnavailable(format!(
        "recognition connection failed: {}",
        err.without_url()
    ))
}

pub async fn request_failed(response: reqwest::Response) -> TranscriptionError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let reason = serde_json::from_str::<GoogleErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    if reason.is_empty() {
        TranscriptionError::EngineUnavailable(format!("recognition request failed: {}", status))
    } else {
        TranscriptionError::EngineUnavailable(format!(
            "recognition request failed: {}: {}",
            status, reason
        ))
    }
}
