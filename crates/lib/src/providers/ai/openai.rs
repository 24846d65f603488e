use crate::{errors::PlanError, providers::ai::ChatProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

// --- OpenAI-compatible provider implementation ---

/// A chat provider for OpenAI and OpenAI-compatible completion APIs.
#[derive(Clone, Debug)]
pub struct OpenAiChatProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl OpenAiChatProvider {
    /// Creates a new `OpenAiChatProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, PlanError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(PlanError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    /// Sends the instruction and the rendered prompt as two system messages.
    async fn generate(&self, instruction: &str, prompt: &str) -> Result<String, PlanError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: instruction.to_string(),
            },
            ChatMessage {
                role: "system".to_string(),
                content: prompt.to_string(),
            },
        ];

        let request_body = ChatRequest {
            messages,
            model: self.model.as_deref(),
            temperature: 0.7,
            stream: false,
        };

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(PlanError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PlanError::AiApi(error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(PlanError::AiDeserialization)?;

        // An empty choices array is treated as an empty completion, not an
        // error; the reconciler downgrades it to the raw fallback.
        let raw_response = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(raw_response)
    }
}
