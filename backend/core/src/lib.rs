pub mod analysis;
pub mod defaults;
pub mod error;
pub mod rubric;
pub mod traits;

pub use analysis::{HairAnalysis, ScorePolicy, MAX_HEALTH_SCORE, MIN_HEALTH_SCORE};
pub use defaults::{
    DEFAULT_BASE_URL, DEFAULT_DESCRIPTION, DEFAULT_JPEG_QUALITY, DEFAULT_TITLE, OPENAI_API_KEY_VAR,
};
pub use error::AnalysisError;
pub use rubric::{default_score_bands, ScoreBand, DEFAULT_MODEL, DEFAULT_SYSTEM_PREAMBLE, DEFAULT_USER_TEXT};
pub use traits::{AnalysisRequest, ImagePayload, OutputSchema, StructuredResponse, VisionClient};
