use axum::extract::multipart::{MultipartError, MultipartRejection};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Multipart request rejected: {0}")]
    MultipartRejected(#[from] MultipartRejection),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reasons an answer request is rejected before the model is called.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("no image was provided")]
    MissingImage,

    #[error("no question was provided")]
    MissingQuestion,

    #[error("neither an image nor a question was provided")]
    MissingBoth,

    #[error("image field is not a file upload")]
    InvalidImage,
}

/// Coarse classification used to pick the client-facing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Configuration,
    Upstream,
    Unexpected,
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::Input,
            Self::Config(_) => ErrorKind::Configuration,
            Self::Llm(_) | Self::Network(_) | Self::OpenAi(_) => ErrorKind::Upstream,
            Self::Multipart(_)
            | Self::MultipartRejected(_)
            | Self::Yaml(_)
            | Self::Io(_)
            | Self::AddrParse(_)
            | Self::Internal(_) => ErrorKind::Unexpected,
        }
    }
}
