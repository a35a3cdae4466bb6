use super::types::{HealthResponse, MessageResponse};
use crate::{
    Result,
    adapter::{AnswerAdapter, AnswerResponse, ImageUpload},
};
use axum::{
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{debug, info};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<AnswerAdapter>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn greet(Path(name): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("welcome to {}", name),
    })
}

/// Reads the `image` and `query` form fields and hands them to the adapter.
///
/// A body that is not multipart, or a form that cannot be read to the end,
/// gets the adapter's failure response instead of axum's rejection.
pub async fn answer(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> AnswerResponse {
    let form = match multipart {
        Ok(multipart) => read_answer_form(multipart).await,
        Err(rejection) => Err(rejection.into()),
    };

    match form {
        Ok((image, question)) => state.adapter.answer(image, question).await,
        Err(e) => state.adapter.reject(e),
    }
}

async fn read_answer_form(
    mut multipart: Multipart,
) -> Result<(Option<ImageUpload>, Option<String>)> {
    let mut image = None;
    let mut question = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                image = Some(ImageUpload {
                    bytes,
                    content_type,
                    file_name,
                });
            }
            Some("query") => question = Some(field.text().await?),
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    info!(
        "Received answer request (image: {}, question: {})",
        image.as_ref().map_or(0, |image: &ImageUpload| image.bytes.len()),
        question.is_some()
    );

    Ok((image, question))
}
