use crate::{errors::PlanError, providers::ai::ImageProvider};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Fixed output size requested for every campaign image.
const IMAGE_SIZE: &str = "1024x1024";

// --- OpenAI-compatible image request and response structures ---

#[derive(Serialize)]
struct ImageRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize, Debug)]
struct ImageDatum {
    url: String,
}

// --- Image provider implementation ---

/// An image provider for OpenAI and OpenAI-compatible image APIs.
#[derive(Clone, Debug)]
pub struct OpenAiImageProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl OpenAiImageProvider {
    /// Creates a new `OpenAiImageProvider`.
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
impl ImageProvider for OpenAiImageProvider {
    /// Requests exactly one image and returns its URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, PlanError> {
        let request_body = ImageRequest {
            model: self.model.as_deref(),
            prompt,
            n: 1,
            size: IMAGE_SIZE,
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

        let image_response: ImageResponse = response
            .json()
            .await
            .map_err(PlanError::AiDeserialization)?;

        image_response
            .data
            .first()
            .map(|d| d.url.clone())
            .ok_or_else(|| PlanError::AiApi("image response contained no data".to_string()))
    }
}
