use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use hairscope_core::{AnalysisError, AnalysisRequest, HairAnalysis, StructuredResponse, VisionClient};

enum Outcome {
    Content(Value),
    Fail(String),
}

/// A vision client that returns a canned answer and counts its calls.
pub struct MockVisionClient {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl MockVisionClient {
    pub fn returning(analysis: &HairAnalysis) -> Self {
        Self::with_content(serde_json::to_value(analysis).unwrap_or(Value::Null))
    }

    /// Return `content` verbatim, even if it does not match the schema.
    pub fn with_content(content: Value) -> Self {
        Self {
            outcome: Outcome::Content(content),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every call with a transport error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &AnalysisRequest) -> Result<StructuredResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Content(content) => Ok(StructuredResponse {
                content: content.clone(),
                provider: "mock".to_string(),
                model: request.model.clone(),
                tokens_used: 0,
                latency_ms: 0,
            }),
            Outcome::Fail(message) => Err(AnalysisError::Transport(message.clone()).into()),
        }
    }
}
