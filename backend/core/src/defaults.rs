//! Values shared by the config layer and the components it configures.

/// Environment variable holding the OpenAI credential.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

pub const DEFAULT_TITLE: &str = "AI Hair & Scalp Analyzer";

pub const DEFAULT_DESCRIPTION: &str =
    "Upload an image or use your camera to capture your hair/scalp for analysis.";
