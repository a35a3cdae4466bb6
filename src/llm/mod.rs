mod client;
mod gemini;
mod types;

pub use client::{LlmClient, OpenAiClient, create_llm_client};
pub use gemini::{DEFAULT_BASE_URL, GeminiClient};
pub use types::*;
