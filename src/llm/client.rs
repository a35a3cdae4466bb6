use super::{gemini::GeminiClient, types::*};
use crate::{
    Error, Result,
    config::{LlmConfig, Provider},
};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one image and prompt, returning the model's raw text answer.
    async fn generate(&self, payload: ModelInvocationPayload) -> Result<String>;
}

pub fn create_llm_client(config: LlmConfig) -> Result<Arc<dyn LlmClient>> {
    debug!("Creating {:?} LLM client for model {}", config.provider, config.model);

    let client: Arc<dyn LlmClient> = match config.provider {
        Provider::Gemini => Arc::new(GeminiClient::new(config)?),
        Provider::Openai => Arc::new(OpenAiClient::new(config)?),
    };

    Ok(client)
}

pub(crate) fn http_client(timeout_secs: Option<u64>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Any OpenAI-compatible chat completions endpoint that accepts image URLs.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        // async-openai retries 5xx and rate-limited responses until the backoff
        // expires; a zero budget turns that into a single attempt.
        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(openai_config)
            .with_http_client(http_client(config.timeout_secs)?)
            .with_backoff(no_retry);

        Ok(Self {
            client,
            model: config.model,
        })
    }

    fn build_request(
        &self,
        payload: ModelInvocationPayload,
    ) -> Result<openai_types::CreateChatCompletionRequest> {
        let image_part = openai_types::ChatCompletionRequestMessageContentPartImageArgs::default()
            .image_url(
                openai_types::ImageUrlArgs::default()
                    .url(payload.image.data_url())
                    .detail(openai_types::ImageDetail::Auto)
                    .build()?,
            )
            .build()?;

        let text_part = openai_types::ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(payload.prompt)
            .build()?;

        let message = openai_types::ChatCompletionRequestUserMessageArgs::default()
            .content(openai_types::ChatCompletionRequestUserMessageContent::Array(
                vec![image_part.into(), text_part.into()],
            ))
            .build()?;

        let request = openai_types::CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message.into()])
            .build()?;

        Ok(request)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(&self, payload: ModelInvocationPayload) -> Result<String> {
        debug!(
            "Creating chat completion with {} image ({} base64 chars)",
            payload.image.mime_type,
            payload.image.data.len()
        );

        let request = self.build_request(payload)?;
        let response = self.client.chat().create(request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| Error::llm("chat completion response contained no text"))
    }
}
