pub mod format;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod request;

pub use format::format_analysis;
pub use pipeline::{HairAnalyzer, ERROR_PREFIX, NO_IMAGE_MESSAGE};
pub use prompt::render_system_prompt;
pub use providers::{mock::MockVisionClient, openai::OpenAiVisionClient};
pub use request::{hair_analysis_schema, RequestBuilder, HAIR_ANALYSIS_SCHEMA_NAME};
