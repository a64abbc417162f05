//! Hairscope configuration schema, typed for serde YAML/JSON.
//!
//! Every field is optional so a partial file is valid; accessors fall back
//! to the constants in [`crate::defaults`].

use hairscope_core::{ScoreBand, ScorePolicy};
use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HairscopeConfig {
    /// Vision model endpoint and credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelConfig>,

    /// Prompt wording and scoring rubric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptConfig>,

    /// Post-processing of model answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisConfig>,

    /// HTTP UI server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Whole-request timeout; transport default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_preamble: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_bands: Option<Vec<ScoreBand>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_policy: Option<ScorePolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg_quality: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for daily rolling JSON files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl HairscopeConfig {
    pub fn model_id(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.id.as_deref())
            .unwrap_or(DEFAULT_MODEL_ID)
    }

    pub fn base_url(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.model
            .as_ref()
            .and_then(|m| m.api_key.as_deref())
            .filter(|k| !k.is_empty())
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.model.as_ref().and_then(|m| m.timeout_secs)
    }

    pub fn system_preamble(&self) -> &str {
        self.prompt
            .as_ref()
            .and_then(|p| p.system_preamble.as_deref())
            .unwrap_or(DEFAULT_SYSTEM_PREAMBLE)
    }

    pub fn user_text(&self) -> &str {
        self.prompt
            .as_ref()
            .and_then(|p| p.user_text.as_deref())
            .unwrap_or(DEFAULT_USER_TEXT)
    }

    pub fn score_bands(&self) -> Vec<ScoreBand> {
        self.prompt
            .as_ref()
            .and_then(|p| p.score_bands.clone())
            .unwrap_or_else(default_score_bands)
    }

    pub fn score_policy(&self) -> ScorePolicy {
        self.analysis
            .as_ref()
            .and_then(|a| a.score_policy)
            .unwrap_or_default()
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.analysis
            .as_ref()
            .and_then(|a| a.jpeg_quality)
            .unwrap_or(DEFAULT_JPEG_QUALITY)
    }

    pub fn bind(&self) -> &str {
        self.gateway
            .as_ref()
            .and_then(|g| g.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.gateway
            .as_ref()
            .and_then(|g| g.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.gateway
            .as_ref()
            .and_then(|g| g.max_upload_bytes)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn title(&self) -> &str {
        self.gateway
            .as_ref()
            .and_then(|g| g.title.as_deref())
            .unwrap_or(DEFAULT_TITLE)
    }

    pub fn description(&self) -> &str {
        self.gateway
            .as_ref()
            .and_then(|g| g.description.as_deref())
            .unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}
