//! Wiring from configuration to runtime components.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use hairscope_config::HairscopeConfig;
use hairscope_core::{AnalysisError, OPENAI_API_KEY_VAR};
use hairscope_gateway::UiPage;
use hairscope_logging::LogSettings;
use hairscope_understanding::{HairAnalyzer, OpenAiVisionClient, RequestBuilder};

pub fn log_settings(config: &HairscopeConfig) -> LogSettings {
    LogSettings {
        level: config.log_level().to_string(),
        dir: config.log_dir().map(PathBuf::from),
        json: config.log_json(),
    }
}

pub fn ui_page(config: &HairscopeConfig) -> UiPage {
    UiPage {
        title: config.title().to_string(),
        description: config.description().to_string(),
    }
}

/// Build the analyzer with one OpenAI client for the life of the process.
pub fn build_analyzer(config: &HairscopeConfig) -> Result<HairAnalyzer> {
    let api_key = config
        .api_key()
        .ok_or_else(|| AnalysisError::MissingCredential(OPENAI_API_KEY_VAR.into()))?;

    let mut client = OpenAiVisionClient::new(api_key)?.with_base_url(config.base_url());
    if let Some(secs) = config.timeout_secs() {
        client = client.with_timeout(Duration::from_secs(secs))?;
    }

    let builder = RequestBuilder::new(
        config.model_id(),
        config.system_preamble(),
        config.user_text(),
        &config.score_bands(),
    );

    Ok(HairAnalyzer::new(Arc::new(client), builder)
        .with_score_policy(config.score_policy())
        .with_jpeg_quality(config.jpeg_quality()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hairscope_config::schema::{LoggingConfig, ModelConfig};

    fn with_key(key: Option<&str>) -> HairscopeConfig {
        HairscopeConfig {
            model: Some(ModelConfig {
                id: Some("gpt-4o".into()),
                api_key: key.map(str::to_string),
                timeout_secs: Some(20),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn missing_key_fails_at_startup() {
        let err = build_analyzer(&with_key(None)).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::MissingCredential(_))
        ));
    }

    #[test]
    fn analyzer_uses_configured_model() {
        let analyzer = build_analyzer(&with_key(Some("sk-test"))).unwrap();
        assert_eq!(analyzer.model(), "gpt-4o");
        assert_eq!(analyzer.provider(), "openai");
    }

    #[test]
    fn log_settings_follow_config() {
        let cfg = HairscopeConfig {
            logging: Some(LoggingConfig {
                level: Some("debug".into()),
                dir: Some("/tmp/hairscope-logs".into()),
                json: Some(true),
            }),
            ..Default::default()
        };
        let settings = log_settings(&cfg);
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.dir, Some(PathBuf::from("/tmp/hairscope-logs")));
        assert!(settings.json);
    }

    #[test]
    fn page_uses_default_title() {
        assert_eq!(ui_page(&HairscopeConfig::default()).title, "AI Hair & Scalp Analyzer");
    }

    #[test]
    fn config_defaults_match_component_defaults() {
        let cfg = HairscopeConfig::default();
        assert_eq!(cfg.jpeg_quality(), hairscope_media::DEFAULT_JPEG_QUALITY);
        assert_eq!(cfg.base_url(), hairscope_core::DEFAULT_BASE_URL);
        let page = ui_page(&cfg);
        assert_eq!(page.title, UiPage::default().title);
        assert_eq!(page.description, UiPage::default().description);
    }
}
