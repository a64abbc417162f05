//! Config defaults: applies default values to parsed config.

use crate::schema::{AnalysisConfig, GatewayConfig, HairscopeConfig, LoggingConfig, ModelConfig, PromptConfig};

pub use hairscope_core::{
    default_score_bands, DEFAULT_BASE_URL, DEFAULT_DESCRIPTION, DEFAULT_JPEG_QUALITY, DEFAULT_SYSTEM_PREAMBLE,
    DEFAULT_TITLE, DEFAULT_USER_TEXT,
};

pub const DEFAULT_MODEL_ID: &str = hairscope_core::DEFAULT_MODEL;

pub const DEFAULT_BIND: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 7860;

/// 20 MiB; phone camera photos exceed axum's 2 MB default.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: HairscopeConfig) -> HairscopeConfig {
    let config = apply_model_defaults(config);
    let config = apply_prompt_defaults(config);
    let config = apply_analysis_defaults(config);
    let config = apply_gateway_defaults(config);
    apply_logging_defaults(config)
}

/// The API key is left unset; it comes from the environment.
fn apply_model_defaults(mut config: HairscopeConfig) -> HairscopeConfig {
    let model = config.model.get_or_insert_with(ModelConfig::default);
    model.id.get_or_insert_with(|| DEFAULT_MODEL_ID.to_string());
    model.base_url.get_or_insert_with(|| DEFAULT_BASE_URL.to_string());
    config
}

fn apply_prompt_defaults(mut config: HairscopeConfig) -> HairscopeConfig {
    let prompt = config.prompt.get_or_insert_with(PromptConfig::default);
    prompt
        .system_preamble
        .get_or_insert_with(|| DEFAULT_SYSTEM_PREAMBLE.to_string());
    prompt.user_text.get_or_insert_with(|| DEFAULT_USER_TEXT.to_string());
    prompt.score_bands.get_or_insert_with(default_score_bands);
    config
}

fn apply_analysis_defaults(mut config: HairscopeConfig) -> HairscopeConfig {
    let analysis = config.analysis.get_or_insert_with(AnalysisConfig::default);
    analysis.score_policy.get_or_insert_with(Default::default);
    analysis.jpeg_quality.get_or_insert(DEFAULT_JPEG_QUALITY);
    config
}

fn apply_gateway_defaults(mut config: HairscopeConfig) -> HairscopeConfig {
    let gateway = config.gateway.get_or_insert_with(GatewayConfig::default);
    gateway.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    gateway.port.get_or_insert(DEFAULT_PORT);
    gateway.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    gateway.title.get_or_insert_with(|| DEFAULT_TITLE.to_string());
    gateway
        .description
        .get_or_insert_with(|| DEFAULT_DESCRIPTION.to_string());
    config
}

fn apply_logging_defaults(mut config: HairscopeConfig) -> HairscopeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}
