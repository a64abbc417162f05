//! Environment variable substitution and overrides.
//!
//! String values may reference `${VAR_NAME}` (uppercase names only), resolved
//! at load time. `$${VAR}` escapes to a literal `${VAR}`.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::schema::{GatewayConfig, HairscopeConfig, ModelConfig};

/// Matches `${VAR}` and its escaped form `$${VAR}`.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub use hairscope_core::OPENAI_API_KEY_VAR as API_KEY_VAR;
pub const BIND_VAR: &str = "HAIRSCOPE_BIND";
pub const PORT_VAR: &str = "HAIRSCOPE_PORT";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in every string leaf of `value`.
///
/// A referenced var that is unset or empty is an error.
pub fn resolve_env_vars(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    Ok(substitute(value, env, "")?)
}

fn substitute(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<Value, MissingEnvVarError> {
    match value {
        Value::String(s) => substitute_string(s, env, path).map(Value::String),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<String, MissingEnvVarError> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }
    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name).filter(|v| !v.is_empty()) {
            Some(val) => val.clone(),
            None => {
                if missing.is_none() {
                    missing = Some(MissingEnvVarError {
                        var_name: name.to_string(),
                        config_path: path.to_string(),
                    });
                }
                String::new()
            }
        }
    });
    match missing {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

/// Apply `OPENAI_API_KEY`, `HAIRSCOPE_BIND` and `HAIRSCOPE_PORT`.
///
/// The key only fills an unset credential; bind and port always win.
pub fn apply_env_overrides(mut config: HairscopeConfig, env: &HashMap<String, String>) -> HairscopeConfig {
    if config.api_key().is_none() {
        if let Some(key) = env.get(API_KEY_VAR).filter(|k| !k.is_empty()) {
            config.model.get_or_insert_with(ModelConfig::default).api_key = Some(key.clone());
            debug!("Using credential from {API_KEY_VAR}");
        }
    }
    if let Some(bind) = env.get(BIND_VAR).filter(|b| !b.is_empty()) {
        config.gateway.get_or_insert_with(GatewayConfig::default).bind = Some(bind.clone());
    }
    if let Some(port) = env.get(PORT_VAR) {
        match port.parse::<u16>() {
            Ok(port) => config.gateway.get_or_insert_with(GatewayConfig::default).port = Some(port),
            Err(_) => warn!(value = %port, "Ignoring unparseable {PORT_VAR}"),
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_nested_var() {
        let v = json!({"model": {"apiKey": "${OPENAI_API_KEY}"}});
        let out = resolve_env_vars(&v, &env(&[("OPENAI_API_KEY", "sk-abc123")])).unwrap();
        assert_eq!(out["model"]["apiKey"], "sk-abc123");
    }

    #[test]
    fn error_names_var_and_path() {
        let v = json!({"prompt": {"userText": "hi ${WHO}"}});
        let err = resolve_env_vars(&v, &HashMap::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("WHO"));
        assert!(msg.contains("prompt.userText"));
    }

    #[test]
    fn escaped_reference_is_literal() {
        let v = json!({"text": "cost $${PRICE}"});
        let out = resolve_env_vars(&v, &HashMap::new()).unwrap();
        assert_eq!(out["text"], "cost ${PRICE}");
    }

    #[test]
    fn lowercase_names_are_not_vars() {
        let v = json!({"text": "${lower}"});
        let out = resolve_env_vars(&v, &HashMap::new()).unwrap();
        assert_eq!(out["text"], "${lower}");
    }

    #[test]
    fn overrides_port_and_bind() {
        let cfg = apply_env_overrides(
            HairscopeConfig::default(),
            &env(&[("HAIRSCOPE_PORT", "8081"), ("HAIRSCOPE_BIND", "0.0.0.0")]),
        );
        assert_eq!(cfg.port(), 8081);
        assert_eq!(cfg.bind(), "0.0.0.0");
    }

    #[test]
    fn bad_port_is_ignored() {
        let cfg = apply_env_overrides(HairscopeConfig::default(), &env(&[("HAIRSCOPE_PORT", "http")]));
        assert_eq!(cfg.port(), crate::defaults::DEFAULT_PORT);
    }

    #[test]
    fn configured_key_beats_environment() {
        let cfg = HairscopeConfig {
            model: Some(ModelConfig {
                api_key: Some("sk-file".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let cfg = apply_env_overrides(cfg, &env(&[("OPENAI_API_KEY", "sk-env")]));
        assert_eq!(cfg.api_key(), Some("sk-file"));
    }
}
