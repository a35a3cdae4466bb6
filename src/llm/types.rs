use serde::{Deserialize, Serialize};

/// Image bytes ready to embed in a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Standard base64, padded.
    pub data: String,
}

impl InlineImage {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Everything a provider needs for one answer: the image and the wrapped prompt.
#[derive(Debug, Clone)]
pub struct ModelInvocationPayload {
    pub image: InlineImage,
    pub prompt: String,
}

// Gemini `generateContent` wire format

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Variant order matters for untagged decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl From<&ModelInvocationPayload> for GenerateContentRequest {
    fn from(payload: &ModelInvocationPayload) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: payload.image.mime_type.clone(),
                            data: payload.image.data.clone(),
                        },
                    },
                    Part::Text {
                        text: payload.prompt.clone(),
                    },
                ],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload() -> ModelInvocationPayload {
        ModelInvocationPayload {
            image: InlineImage {
                mime_type: "image/png".to_string(),
                data: "aGVsbG8=".to_string(),
            },
            prompt: "What is this?".to_string(),
        }
    }

    #[test]
    fn test_request_serializes_inline_data_then_text() {
        let request = GenerateContentRequest::from(&payload());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}},
                        {"text": "What is this?"}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {
                    "content": {"role": "model", "parts": [{"text": "Two cats."}, {"text": "\nSentiment: calm"}]},
                    "finishReason": "STOP"
                },
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("Two cats.\nSentiment: calm"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        assert!(response.text().is_none());
        assert_eq!(
            response.prompt_feedback.and_then(|f| f.block_reason).as_deref(),
            Some("SAFETY")
        );
    }

    #[test]
    fn test_unknown_parts_are_tolerated() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"functionCall": {"name": "x"}}, {"text": "ok"}]}}]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("ok"));
    }

    #[test]
    fn test_data_url() {
        assert_eq!(payload().image.data_url(), "data:image/png;base64,aGVsbG8=");
    }
}
