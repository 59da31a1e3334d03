use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use tower::ServiceExt;

use transcribe_gateway::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, request_id_middleware,
};

fn echo_router() -> Router {
    Router::new()
        .route(
            "/echo",
            get(|Extension(id): Extension<RequestId>| async move { id.0 }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn given_incoming_header_when_handling_then_extension_and_response_carry_it() {
    let request = Request::builder()
        .uri("/echo")
        .header(REQUEST_ID_HEADER, "trace-42")
        .body(Body::empty())
        .unwrap();

    let response = echo_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-42");
    assert_eq!(body_text(response).await, "trace-42");
}

#[tokio::test]
async fn given_empty_header_when_handling_then_generates_uuid() {
    let request = Request::builder()
        .uri("/echo")
        .header(REQUEST_ID_HEADER, "")
        .body(Body::empty())
        .unwrap();

    let response = echo_router().oneshot(request).await.unwrap();

    let header = response.headers()[REQUEST_ID_HEADER]
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&header).is_ok());
    assert_eq!(body_text(response).await, header);
}

#[test]
fn given_request_id_header_constant_when_accessed_then_is_lowercase() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_request_id_when_displayed_then_renders_raw_value() {
    let id = RequestId("trace-9".to_string());

    assert_eq!(id.to_string(), "trace-9");
    assert_eq!(id.as_str(), "trace-9");
}
