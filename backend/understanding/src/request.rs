//! Builds the structured-output request sent to the vision model.

use hairscope_core::{
    default_score_bands, AnalysisRequest, OutputSchema, ScoreBand, DEFAULT_MODEL,
    DEFAULT_SYSTEM_PREAMBLE, DEFAULT_USER_TEXT,
};
use hairscope_media::EncodedImage;
use serde_json::{json, Value};

use crate::prompt::render_system_prompt;

pub const HAIR_ANALYSIS_SCHEMA_NAME: &str = "HairAnalysis";

/// JSON Schema for [`hairscope_core::HairAnalysis`], strict mode compatible.
pub fn hair_analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "hair_type": {
                "type": "string",
                "description": "The type of hair (straight, wavy, curly, coily)"
            },
            "hair_texture": {
                "type": "string",
                "description": "The texture of the hair (fine, medium, coarse)"
            },
            "scalp_condition": {
                "type": "string",
                "description": "The condition of the scalp"
            },
            "visible_issues": {
                "type": "array",
                "items": { "type": "string" },
                "description": "List of visible issues with the hair"
            },
            "health_score": {
                "type": "integer",
                "description": "Hair health score (must be between 1 and 10)"
            },
            "recommendations": {
                "type": "array",
                "items": { "type": "string" },
                "description": "List of recommendations for hair care"
            }
        },
        "required": [
            "hair_type",
            "hair_texture",
            "scalp_condition",
            "visible_issues",
            "health_score",
            "recommendations"
        ],
        "additionalProperties": false
    })
}

/// Holds the fixed parts of every request; only the image varies.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model: String,
    system_prompt: String,
    user_prompt: String,
    schema: Value,
}

impl RequestBuilder {
    pub fn new(
        model: impl Into<String>,
        system_preamble: &str,
        user_text: impl Into<String>,
        bands: &[ScoreBand],
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: render_system_prompt(system_preamble, bands),
            user_prompt: user_text.into(),
            schema: hair_analysis_schema(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn build(&self, image: &EncodedImage) -> AnalysisRequest {
        AnalysisRequest {
            model: self.model.clone(),
            system_prompt: self.system_prompt.clone(),
            user_prompt: self.user_prompt.clone(),
            image: image.to_payload(),
            output_schema: OutputSchema {
                name: HAIR_ANALYSIS_SCHEMA_NAME.to_string(),
                schema: self.schema.clone(),
            },
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(
            DEFAULT_MODEL,
            DEFAULT_SYSTEM_PREAMBLE,
            DEFAULT_USER_TEXT,
            &default_score_bands(),
        )
    }
}
