//! The hair analysis record returned by the vision model.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AnalysisError;

/// Lowest valid health score.
pub const MIN_HEALTH_SCORE: i64 = 1;

/// Highest valid health score.
pub const MAX_HEALTH_SCORE: i64 = 10;

/// Structured hair and scalp assessment, one per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HairAnalysis {
    /// straight, wavy, curly, coily
    pub hair_type: String,
    /// fine, medium, coarse
    pub hair_texture: String,
    pub scalp_condition: String,
    pub visible_issues: Vec<String>,
    pub health_score: i64,
    pub recommendations: Vec<String>,
}

/// How a health score outside 1..=10 is treated once the model has answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorePolicy {
    /// Pull the score to the nearest bound.
    #[default]
    Clamp,
    /// Fail the submission.
    Reject,
    /// Leave the score as reported.
    Passthrough,
}

impl HairAnalysis {
    /// Whether the score lies in the documented range.
    pub fn score_in_range(&self) -> bool {
        (MIN_HEALTH_SCORE..=MAX_HEALTH_SCORE).contains(&self.health_score)
    }

    /// Apply `policy` to the health score.
    pub fn enforce_score(mut self, policy: ScorePolicy) -> Result<Self, AnalysisError> {
        if self.score_in_range() {
            return Ok(self);
        }
        match policy {
            ScorePolicy::Clamp => {
                let clamped = self.health_score.clamp(MIN_HEALTH_SCORE, MAX_HEALTH_SCORE);
                warn!(
                    reported = self.health_score,
                    clamped, "Health score out of range; clamping"
                );
                self.health_score = clamped;
                Ok(self)
            }
            ScorePolicy::Reject => Err(AnalysisError::ScoreOutOfRange(self.health_score)),
            ScorePolicy::Passthrough => Ok(self),
        }
    }
}
