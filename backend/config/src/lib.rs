//! `hairscope-config` — runtime configuration for Hairscope.
//!
//! Provides:
//! - Typed config schema (model, prompt, analysis, gateway, logging)
//! - YAML loading with a default location and first-run fallback
//! - `${ENV_VAR}` substitution and environment overrides
//! - Default value application
//! - Validation of the scoring rubric and numeric ranges
//! - Redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars, MissingEnvVarError};
pub use io::{default_config_path, load_config};
pub use redact::redact;
pub use schema::HairscopeConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load a config file and run it through [`prepare`] with the process environment.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<HairscopeConfig> {
    let raw = load_config(path).await?;
    prepare(raw, &std::env::vars().collect())
}

/// Substitute env vars, apply defaults and overrides, then validate.
///
/// Validation errors abort; warnings are logged.
pub fn prepare(raw: HairscopeConfig, env: &HashMap<String, String>) -> Result<HairscopeConfig> {
    let value: Value =
        serde_json::to_value(&raw).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value, env).context("Failed to resolve env vars in config")?;
    let config: HairscopeConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(apply_all_defaults(config), env);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        let summary: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
        bail!("invalid configuration: {}", summary.join("; "));
    }

    Ok(config)
}
