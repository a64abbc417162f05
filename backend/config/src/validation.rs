//! Config validation with user-friendly error messages.

use crate::schema::HairscopeConfig;
use hairscope_core::{ScoreBand, MAX_HEALTH_SCORE, MIN_HEALTH_SCORE};
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &HairscopeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_model(config, &mut report);
    validate_bands(&config.score_bands(), &mut report);
    validate_analysis(config, &mut report);
    validate_gateway(config, &mut report);
    report
}

fn validate_model(config: &HairscopeConfig, report: &mut ValidationReport) {
    if config.model_id().trim().is_empty() {
        report.error("model.id", "Model id cannot be empty");
    }
    let url = config.base_url();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        report.error("model.baseUrl", format!("'{url}' is not an http(s) URL"));
    }
    if config.api_key().is_none() {
        report.warn("model.apiKey", "No API key configured; set OPENAI_API_KEY");
    }
    if config.timeout_secs() == Some(0) {
        report.error("model.timeoutSecs", "timeoutSecs must be > 0");
    }
}

/// Bands must be ordered, contiguous, and cover the whole score range.
fn validate_bands(bands: &[ScoreBand], report: &mut ValidationReport) {
    const PATH: &str = "prompt.scoreBands";
    if bands.is_empty() {
        report.error(PATH, "At least one score band is required");
        return;
    }
    let mut expected = MIN_HEALTH_SCORE;
    for (i, band) in bands.iter().enumerate() {
        if band.min > band.max {
            report.error(format!("{PATH}[{i}]"), format!("min {} exceeds max {}", band.min, band.max));
            return;
        }
        if band.min != expected {
            report.error(
                format!("{PATH}[{i}]"),
                format!("band starts at {} but {} was expected", band.min, expected),
            );
            return;
        }
        if band.label.trim().is_empty() {
            report.warn(format!("{PATH}[{i}].label"), "Band label is empty");
        }
        expected = band.max + 1;
    }
    if expected != MAX_HEALTH_SCORE + 1 {
        report.error(
            PATH,
            format!("bands end at {} instead of {MAX_HEALTH_SCORE}", expected - 1),
        );
    }
}

fn validate_analysis(config: &HairscopeConfig, report: &mut ValidationReport) {
    let quality = config.jpeg_quality();
    if !(1..=100).contains(&quality) {
        report.error("analysis.jpegQuality", format!("{quality} is outside 1..=100"));
    }
}

fn validate_gateway(config: &HairscopeConfig, report: &mut ValidationReport) {
    if config.bind().trim().is_empty() {
        report.error("gateway.bind", "Bind address cannot be empty");
    }
    if config.max_upload_bytes() == 0 {
        report.error("gateway.maxUploadBytes", "maxUploadBytes must be > 0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AnalysisConfig, ModelConfig, PromptConfig};

    fn with_bands(bands: Vec<ScoreBand>) -> HairscopeConfig {
        HairscopeConfig {
            model: Some(ModelConfig {
                api_key: Some("sk-test".into()),
                ..Default::default()
            }),
            prompt: Some(PromptConfig {
                score_bands: Some(bands),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn default_config_is_valid_but_warns_without_key() {
        let report = validate(&HairscopeConfig::default());
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.path == "model.apiKey"));
    }

    #[test]
    fn gap_between_bands_is_an_error() {
        let report = validate(&with_bands(vec![
            ScoreBand::new(1, 3, "Poor"),
            ScoreBand::new(5, 10, "Fine"),
        ]));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "prompt.scoreBands[1]");
    }

    #[test]
    fn short_coverage_is_an_error() {
        let report = validate(&with_bands(vec![ScoreBand::new(1, 8, "Ok")]));
        assert!(!report.is_valid());
        assert!(report.errors[0].message.contains("end at 8"));
    }

    #[test]
    fn inverted_band_is_an_error() {
        let report = validate(&with_bands(vec![ScoreBand::new(10, 1, "Odd")]));
        assert!(report.errors[0].message.contains("exceeds"));
    }

    #[test]
    fn empty_label_only_warns() {
        let report = validate(&with_bands(vec![ScoreBand::new(1, 10, " ")]));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn zero_quality_is_rejected() {
        let mut cfg = with_bands(hairscope_core::default_score_bands());
        cfg.analysis = Some(AnalysisConfig {
            jpeg_quality: Some(0),
            ..Default::default()
        });
        assert!(!validate(&cfg).is_valid());
    }
}
