use super::mocks::MockLlmClient;
use axum::{Router, body::Body, http::Request};
use ayre_rust::{
    adapter::{AnswerAdapter, ImageUpload},
    config::{Config, LlmConfig, ResponseMode},
    server::{self, handlers::AppState},
};
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-api-key-3f9a";
pub const BOUNDARY: &str = "ayre-test-boundary";

/// Smallest byte string that still carries a PNG signature.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.llm = LlmConfig {
        api_key: TEST_API_KEY.to_string(),
        ..LlmConfig::default()
    };
    config
}

pub fn png_upload() -> ImageUpload {
    ImageUpload::new(PNG_BYTES)
        .with_content_type("image/png")
        .with_file_name(Some("cat.png".to_string()))
}

pub fn create_adapter(client: &MockLlmClient, mode: ResponseMode) -> AnswerAdapter {
    AnswerAdapter::new(Arc::new(client.clone()), mode)
}

pub fn create_test_app(adapter: AnswerAdapter) -> Router {
    create_test_app_with_limit(adapter, create_test_config().server.max_upload_bytes)
}

pub fn create_test_app_with_limit(adapter: AnswerAdapter, max_upload_bytes: usize) -> Router {
    let state = AppState {
        adapter: Arc::new(adapter),
    };
    server::router(state, max_upload_bytes)
}

/// A part of a hand-built multipart body.
pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: Option<&'a str>,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                    )
                    .as_bytes(),
                );
                if let Some(content_type) = content_type {
                    body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn answer_request(parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/answer")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}
