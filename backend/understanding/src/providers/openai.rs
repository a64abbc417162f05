use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use hairscope_core::{
    AnalysisError, AnalysisRequest, StructuredResponse, VisionClient, DEFAULT_BASE_URL, OPENAI_API_KEY_VAR,
};

/// Longest slice of an error body carried into the error message.
const MAX_ERROR_BODY: usize = 500;

/// OpenAI chat completions with `json_schema` structured output.
pub struct OpenAiVisionClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiVisionClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AnalysisError::MissingCredential(OPENAI_API_KEY_VAR.into()).into());
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the transport default with a whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        Ok(self)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

fn chat_body(request: &AnalysisRequest) -> ChatRequest<'_> {
    ChatRequest {
        model: &request.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(&request.system_prompt),
            },
            ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: &request.user_prompt,
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: request.image.data_uri(),
                        },
                    },
                ]),
            },
        ],
        response_format: ResponseFormat {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name: &request.output_schema.name,
                strict: true,
                schema: &request.output_schema.schema,
            },
        },
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

fn status_error(status: StatusCode, body: &str) -> AnalysisError {
    let body = truncate(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AnalysisError::Unauthorized {
            status: status.as_u16(),
            body,
        },
        _ => AnalysisError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

/// Pull the structured object out of a completion body.
fn extract_content(response: ChatResponse) -> Result<(Value, Option<String>, u64), AnalysisError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| AnalysisError::MalformedResponse("response has no choices".into()))?;

    if let Some(refusal) = message.refusal.filter(|r| !r.is_empty()) {
        return Err(AnalysisError::Refusal(refusal));
    }

    let text = message
        .content
        .ok_or_else(|| AnalysisError::MalformedResponse("message has no content".into()))?;
    let content: Value = serde_json::from_str(&text)
        .map_err(|e| AnalysisError::MalformedResponse(format!("content is not JSON: {e}")))?;

    let tokens = response.usage.and_then(|u| u.total_tokens).unwrap_or(0);
    Ok((content, response.model, tokens))
}

#[async_trait]
impl VisionClient for OpenAiVisionClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &AnalysisRequest) -> Result<StructuredResponse> {
        let start = Instant::now();
        let body = chat_body(request);

        debug!(
            model = %request.model,
            image_bytes = request.image.base64.len(),
            "Sending structured request to OpenAI"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(status_error(status, &text).into());
        }

        let chat: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        let (content, model, tokens_used) = extract_content(chat)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(latency_ms, tokens_used, "OpenAI responded");

        Ok(StructuredResponse {
            content,
            provider: "openai".to_string(),
            model: model.unwrap_or_else(|| request.model.clone()),
            tokens_used,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
    use hairscope_core::{HairAnalysis, ImagePayload, OutputSchema};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    use crate::request::hair_analysis_schema;

    type Seen = Arc<Mutex<Option<(Option<String>, Value)>>>;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            model: "gpt-4o-mini".into(),
            system_prompt: "You are a professional hair analysis system.".into(),
            user_prompt: "Analyze this hair/scalp image.".into(),
            image: ImagePayload {
                mime_type: "image/jpeg".into(),
                base64: "/9j/".into(),
            },
            output_schema: OutputSchema {
                name: "HairAnalysis".into(),
                schema: hair_analysis_schema(),
            },
        }
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn completion(message: Value) -> Value {
        json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{ "index": 0, "message": message, "finish_reason": "stop" }],
            "usage": { "total_tokens": 321 }
        })
    }

    #[test]
    fn missing_key_is_a_credential_error() {
        let err = OpenAiVisionClient::new("  ").err().unwrap();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::MissingCredential(_))
        ));
    }

    #[test]
    fn body_carries_messages_image_and_schema() {
        let req = request();
        let body = serde_json::to_value(chat_body(&req)).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"][0]["type"], "text");
        assert_eq!(body["messages"][1]["content"][1]["type"], "image_url");
        assert_eq!(
            body["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,/9j/"
        );
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "HairAnalysis");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[tokio::test]
    async fn parses_structured_content() {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .route(
                "/v1/chat/completions",
                post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *seen.lock().unwrap() = Some((auth, body));
                    let content = json!({
                        "hair_type": "curly",
                        "hair_texture": "coarse",
                        "scalp_condition": "dry",
                        "visible_issues": ["dandruff"],
                        "health_score": 6,
                        "recommendations": ["use moisturizing shampoo"]
                    });
                    Json(completion(json!({
                        "role": "assistant",
                        "content": content.to_string(),
                        "refusal": null
                    })))
                }),
            )
            .with_state(seen.clone());
        let base = spawn(router).await;

        let client = OpenAiVisionClient::new("sk-test").unwrap().with_base_url(base);
        let response = client.complete(&request()).await.unwrap();
        let analysis: HairAnalysis = response.parse().unwrap();

        assert_eq!(analysis.hair_type, "curly");
        assert_eq!(analysis.visible_issues, vec!["dandruff".to_string()]);
        assert_eq!(response.tokens_used, 321);
        assert_eq!(response.model, "gpt-4o-mini-2024-07-18");

        let (auth, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["response_format"]["json_schema"]["name"], "HairAnalysis");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    axum::http::StatusCode::UNAUTHORIZED,
                    r#"{"error":{"message":"Incorrect API key provided"}}"#,
                )
            }),
        );
        let base = spawn(router).await;
        let client = OpenAiVisionClient::new("sk-bad").unwrap().with_base_url(base);

        let err = client.complete(&request()).await.unwrap_err();
        match err.downcast_ref::<AnalysisError>() {
            Some(AnalysisError::Unauthorized { status, body }) => {
                assert_eq!(*status, 401);
                assert!(body.contains("Incorrect API key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let base = spawn(router).await;
        let client = OpenAiVisionClient::new("sk-test").unwrap().with_base_url(base);

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::Api { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn refusal_is_reported() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                Json(completion(json!({
                    "role": "assistant",
                    "content": null,
                    "refusal": "I can't help with that."
                })))
            }),
        );
        let base = spawn(router).await;
        let client = OpenAiVisionClient::new("sk-test").unwrap().with_base_url(base);

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::Refusal(_))
        ));
    }

    #[tokio::test]
    async fn non_json_content_is_malformed() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                Json(completion(json!({ "role": "assistant", "content": "Your hair looks great!" })))
            }),
        );
        let base = spawn(router).await;
        let client = OpenAiVisionClient::new("sk-test").unwrap().with_base_url(base);

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OpenAiVisionClient::new("sk-test")
            .unwrap()
            .with_base_url(format!("http://{addr}/v1"));
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::Transport(_))
        ));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(2_000);
        match status_error(StatusCode::BAD_REQUEST, &body) {
            AnalysisError::Api { body, .. } => assert!(body.chars().count() <= MAX_ERROR_BODY + 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
