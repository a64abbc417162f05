//! Health API

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub model: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "hairscope",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.analyzer.provider().to_string(),
        model: state.analyzer.model().to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request};
    use hairscope_understanding::{HairAnalyzer, MockVisionClient, RequestBuilder};
    use tower::ServiceExt;

    use crate::{build_router, GatewayState, UiPage};

    #[tokio::test]
    async fn reports_model_and_provider() {
        let analyzer = HairAnalyzer::new(
            Arc::new(MockVisionClient::failing("unused")),
            RequestBuilder::default(),
        );
        let app = build_router(GatewayState::new(analyzer, UiPage::default(), 1024));
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["provider"], "mock");
        assert_eq!(json["model"], "gpt-4o-mini");
    }
}
