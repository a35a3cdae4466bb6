use super::upload::ImageUpload;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

pub const NO_IMAGE_PLACEHOLDER: &str =
    "I can't see anything yet... upload an image and I'll take a look.";
pub const NO_QUESTION_PLACEHOLDER: &str =
    "How would I know? Use your own eyes silly! (sigh... just type a question)";
pub const NO_INPUT_PLACEHOLDER: &str =
    "Nothing to look at and nothing to answer. Upload an image and type a question first!";
pub const MALFUNCTION_PLACEHOLDER: &str = "Internal systems malfunctioning. Please try later...";

pub const MISSING_INPUT_ERROR: &str = "Image and query are required";
pub const INVALID_IMAGE_ERROR: &str = "Invalid image file";
pub const MISSING_KEY_ERROR: &str = "API key not found";
pub const GENERIC_ERROR: &str = "Something went wrong";

/// A validated image and question pair.
#[derive(Debug, Clone)]
pub struct AnswerRequest {
    pub image: ImageUpload,
    pub question: String,
}

/// JSON body returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerBody {
    Prediction { prediction: String },
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResponse {
    pub status: StatusCode,
    pub body: AnswerBody,
}

impl AnswerResponse {
    pub fn prediction(status: StatusCode, prediction: impl Into<String>) -> Self {
        Self {
            status,
            body: AnswerBody::Prediction {
                prediction: prediction.into(),
            },
        }
    }

    pub fn error(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: AnswerBody::Error {
                error: error.into(),
            },
        }
    }

    pub fn prediction_text(&self) -> Option<&str> {
        match &self.body {
            AnswerBody::Prediction { prediction } => Some(prediction.as_str()),
            AnswerBody::Error { .. } => None,
        }
    }

    pub fn error_text(&self) -> Option<&str> {
        match &self.body {
            AnswerBody::Error { error } => Some(error.as_str()),
            AnswerBody::Prediction { .. } => None,
        }
    }
}

impl IntoResponse for AnswerResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
