use async_trait::async_trait;
use ayre_rust::{
    Error, Result,
    llm::{LlmClient, ModelInvocationPayload},
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Behaviour {
    Answer(String),
    Fail(String),
    Panic,
}

/// Mock LLM client for testing
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    behaviour: Behaviour,
    pub requests: Arc<Mutex<Vec<ModelInvocationPayload>>>,
}

impl MockLlmClient {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self::with_behaviour(Behaviour::Answer(answer.into()))
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self::with_behaviour(Behaviour::Fail(error.into()))
    }

    pub fn panicking() -> Self {
        Self::with_behaviour(Behaviour::Panic)
    }

    fn with_behaviour(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_requests(&self) -> Vec<ModelInvocationPayload> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, payload: ModelInvocationPayload) -> Result<String> {
        self.requests.lock().unwrap().push(payload);

        match &self.behaviour {
            Behaviour::Answer(answer) => Ok(answer.clone()),
            Behaviour::Fail(error) => Err(Error::llm(error.clone())),
            Behaviour::Panic => panic!("mock model exploded"),
        }
    }
}
