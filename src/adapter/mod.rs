//! Turns an uploaded image and a question into one model call and a
//! client-facing answer.

mod normalize;
mod prompt;
mod types;
mod upload;

pub use normalize::normalize_output;
pub use prompt::{
    ModelPrompt, REFUSAL_INSTRUCTION, ROLE_INSTRUCTION, SENTIMENT_INSTRUCTION, build_prompt,
};
pub use types::*;
pub use upload::{DEFAULT_MIME_TYPE, ImageUpload, detect_mime_type, encode_image};

use crate::{
    Error, Result,
    config::{Config, ResponseMode},
    error::{ErrorKind, InputError},
    llm::{LlmClient, ModelInvocationPayload, create_llm_client},
};
use axum::http::StatusCode;
use std::{sync::Arc, time::Instant};
use tracing::{Instrument, debug, error, info, instrument, warn};
use uuid::Uuid;

pub struct AnswerAdapter {
    /// `None` when no provider credential was configured.
    client: Option<Arc<dyn LlmClient>>,
    mode: ResponseMode,
}

impl AnswerAdapter {
    pub fn new(client: Arc<dyn LlmClient>, mode: ResponseMode) -> Self {
        Self {
            client: Some(client),
            mode,
        }
    }

    /// An adapter that answers every request with a configuration error.
    pub fn unconfigured(mode: ResponseMode) -> Self {
        Self { client: None, mode }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mode = config.server.response_mode;

        if config.llm.api_key.trim().is_empty() {
            warn!("No LLM API key configured, answer requests will fail");
            return Ok(Self::unconfigured(mode));
        }

        let client = create_llm_client(config.llm.clone())?;
        Ok(Self::new(client, mode))
    }

    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    #[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn answer(
        &self,
        image: Option<ImageUpload>,
        question: Option<String>,
    ) -> AnswerResponse {
        let started = Instant::now();
        let question_len = question.as_ref().map_or(0, |question| question.chars().count());
        let image_bytes = image.as_ref().map_or(0, |image| image.bytes.len());

        let outcome = self.run(image, question).await;
        log_failure(&outcome);

        let response = self.respond(outcome);
        info!(
            status = response.status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            question_len,
            image_bytes,
            prediction_len = response.prediction_text().map_or(0, |p| p.chars().count()),
            "prediction served"
        );
        response
    }

    /// Answers a request whose form could not be read at all.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
    pub fn reject(&self, error: Error) -> AnswerResponse {
        let outcome = Err(error);
        log_failure(&outcome);

        let response = self.respond(outcome);
        info!(status = response.status.as_u16(), "answer request rejected");
        response
    }

    async fn run(&self, image: Option<ImageUpload>, question: Option<String>) -> Result<String> {
        let client = self
            .client
            .clone()
            .ok_or_else(|| Error::config(MISSING_KEY_ERROR))?;

        let request = validate_inputs(image, question)?;

        // A panic inside the model call surfaces as a JoinError instead of
        // tearing down the connection.
        tokio::spawn(invoke_model(client, request).in_current_span())
            .await
            .map_err(|e| Error::internal(format!("model invocation aborted: {}", e)))?
    }

    /// Maps the outcome onto the envelope of the configured response mode.
    pub fn respond(&self, outcome: Result<String>) -> AnswerResponse {
        match outcome {
            Ok(prediction) => AnswerResponse::prediction(StatusCode::OK, prediction),
            Err(e) => match self.mode {
                ResponseMode::Strict => strict_failure(&e),
                ResponseMode::Defensive => defensive_failure(&e),
            },
        }
    }
}

fn log_failure(outcome: &Result<String>) {
    if let Err(e) = outcome {
        match e.kind() {
            ErrorKind::Input => info!("Rejected answer request: {}", e),
            _ => error!("Answer request failed: {}", e),
        }
    }
}

/// Accepts the pair only when both an image file and a non-blank question are present.
pub fn validate_inputs(
    image: Option<ImageUpload>,
    question: Option<String>,
) -> std::result::Result<AnswerRequest, InputError> {
    let image = image.filter(|image| !image.is_empty());
    let question = question.filter(|question| !question.trim().is_empty());

    match (image, question) {
        (None, None) => Err(InputError::MissingBoth),
        (None, Some(_)) => Err(InputError::MissingImage),
        (Some(_), None) => Err(InputError::MissingQuestion),
        (Some(image), Some(_)) if image.file_name.is_none() => Err(InputError::InvalidImage),
        (Some(image), Some(question)) => Ok(AnswerRequest { image, question }),
    }
}

async fn invoke_model(client: Arc<dyn LlmClient>, request: AnswerRequest) -> Result<String> {
    let prompt = build_prompt(&request.question);
    let image = encode_image(&request.image);

    debug!(
        "Invoking model with {} image of {} bytes",
        image.mime_type,
        request.image.bytes.len()
    );

    let raw = client
        .generate(ModelInvocationPayload {
            image,
            prompt: prompt.into_string(),
        })
        .await?;
    debug!("Raw model output: {}", raw);

    let clean = normalize_output(&raw);
    if clean != raw {
        debug!("Cleaned model output: {}", clean);
    }

    if clean.trim().is_empty() {
        return Err(Error::llm("model returned an empty answer"));
    }

    Ok(clean)
}

fn strict_failure(e: &Error) -> AnswerResponse {
    match e {
        Error::Input(InputError::InvalidImage) => {
            AnswerResponse::error(StatusCode::BAD_REQUEST, INVALID_IMAGE_ERROR)
        }
        Error::Input(_) => AnswerResponse::error(StatusCode::BAD_REQUEST, MISSING_INPUT_ERROR),
        Error::Config(_) => {
            AnswerResponse::error(StatusCode::INTERNAL_SERVER_ERROR, MISSING_KEY_ERROR)
        }
        _ => AnswerResponse::error(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR),
    }
}

fn defensive_failure(e: &Error) -> AnswerResponse {
    let placeholder = match e {
        Error::Input(InputError::MissingImage | InputError::InvalidImage) => NO_IMAGE_PLACEHOLDER,
        Error::Input(InputError::MissingQuestion) => NO_QUESTION_PLACEHOLDER,
        Error::Input(InputError::MissingBoth) => NO_INPUT_PLACEHOLDER,
        _ => MALFUNCTION_PLACEHOLDER,
    };
    AnswerResponse::prediction(StatusCode::OK, placeholder)
}
