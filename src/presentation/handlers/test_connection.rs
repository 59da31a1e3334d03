use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TestConnectionResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub services: ServiceFlags,
}

#[derive(Debug, Serialize)]
pub struct ServiceFlags {
    pub speech_recognition: bool,
}

pub async fn test_connection_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(TestConnectionResponse {
            status: "success",
            message: "Backend is connected!",
            services: ServiceFlags {
                speech_recognition: true,
            },
        }),
    )
}
