use thiserror::Error;

/// Root causes for a failed analysis submission.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("authentication failed ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("model API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model refused the request: {0}")]
    Refusal(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("could not decode image: {0}")]
    ImageDecode(String),

    #[error("could not encode image as JPEG: {0}")]
    ImageEncode(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("health score {0} is outside 1..=10")]
    ScoreOutOfRange(i64),
}
