use std::fmt;

pub const ROLE_INSTRUCTION: &str = "You are an expert in image analysis.";
pub const SENTIMENT_INSTRUCTION: &str = "Also add a line about the sentiment of the image.";
pub const REFUSAL_INSTRUCTION: &str =
    "Do not answer anything outside the scope of the question or the image.";

/// Instruction text sent alongside the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPrompt(String);

impl ModelPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ModelPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wraps the user's question in the fixed instruction template.
///
/// The question is embedded exactly as given: no escaping, no truncation.
pub fn build_prompt(question: &str) -> ModelPrompt {
    ModelPrompt(format!(
        "{ROLE_INSTRUCTION}\n\
         Given the image provided, please answer the following question concisely: \"{question}\"\n\
         {SENTIMENT_INSTRUCTION}\n\
         {REFUSAL_INSTRUCTION}"
    ))
}
