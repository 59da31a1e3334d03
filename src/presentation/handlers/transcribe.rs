use std::io;

use axum::{Extension, Json};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

use super::error::ApiError;

pub const AUDIO_FIELD: &str = "audio";

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

#[tracing::instrument(
    skip(state, request_id, multipart),
    fields(request_id = %request_id.as_ref().map_or("-", |Extension(id)| id.as_str()))
)]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "Transcribe request is not a multipart upload");
        ApiError::NoAudioFile
    })?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Transcribe request without an audio part");
                return Err(ApiError::NoAudioFile);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                return Err(ApiError::NoAudioFile);
            }
        };

        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            tracing::warn!("Audio part is a plain form field, not a file");
            return Err(ApiError::NoAudioFile);
        };

        let format = state.upload_policy.validate(&filename).inspect_err(|rejection| {
            tracing::warn!(filename = %filename, reason = %rejection, "Upload rejected");
        })?;

        tracing::debug!(filename = %filename, format = %format, "Processing audio upload");

        let stream = field.map_err(io::Error::other).boxed();
        let transcription = state
            .upload_service
            .stage_and_transcribe(&filename, format, stream)
            .await
            .inspect_err(|failure| {
                tracing::warn!(filename = %filename, error = %failure, "Transcription failed");
            })?;

        return Ok(Json(TranscriptionResponse { transcription }));
    }
}
