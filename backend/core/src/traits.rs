use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AnalysisError;

/// Trait for vision-capable models that answer with structured output.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send the request and return the model's structured object.
    async fn complete(&self, request: &AnalysisRequest) -> Result<StructuredResponse>;
}

/// An image ready to be embedded in a request body.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub base64: String,
}

impl ImagePayload {
    /// `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Named JSON Schema the model must conform to.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    pub name: String,
    pub schema: Value,
}

/// Request to a vision provider.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub image: ImagePayload,
    pub output_schema: OutputSchema,
}

/// Structured answer from a vision provider.
#[derive(Debug, Clone)]
pub struct StructuredResponse {
    pub content: Value,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}

impl StructuredResponse {
    /// Deserialize the structured content into `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, AnalysisError> {
        serde_json::from_value(self.content.clone())
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }
}
