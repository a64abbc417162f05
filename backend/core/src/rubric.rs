//! Default prompt wording and the health score rubric.

use serde::{Deserialize, Serialize};

/// Model used when the config names none.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Opening of the system instruction, before the scoring guidelines.
pub const DEFAULT_SYSTEM_PREAMBLE: &str = "You are a professional hair analysis system. \
Analyze the image and provide structured information about the hair and scalp.";

pub const DEFAULT_USER_TEXT: &str = "Analyze this hair/scalp image and provide a detailed hair analysis. \
Remember to provide a health score between 1 and 10 only.";

/// An inclusive range of health scores with its label, e.g. `7-8: Good`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min: i64,
    pub max: i64,
    pub label: String,
}

impl ScoreBand {
    pub fn new(min: i64, max: i64, label: impl Into<String>) -> Self {
        Self { min, max, label: label.into() }
    }
}

/// Poor, Average, Good, Excellent.
pub fn default_score_bands() -> Vec<ScoreBand> {
    vec![
        ScoreBand::new(1, 3, "Poor"),
        ScoreBand::new(4, 6, "Average"),
        ScoreBand::new(7, 8, "Good"),
        ScoreBand::new(9, 10, "Excellent"),
    ]
}
