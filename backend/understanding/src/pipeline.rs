//! One submission: encode, request, parse, enforce score, format.

use std::sync::Arc;

use anyhow::Result;
use image::DynamicImage;
use tracing::{debug, error, info};

use hairscope_core::{HairAnalysis, ScorePolicy, VisionClient};
use hairscope_logging::redact_sensitive_data;
use hairscope_media::{decode_upload, encode_jpeg, DEFAULT_JPEG_QUALITY};

use crate::format::format_analysis;
use crate::request::RequestBuilder;

/// Shown when a submission carries no image.
pub const NO_IMAGE_MESSAGE: &str = "Please upload an image for analysis.";

/// Prefix of every user-visible failure.
pub const ERROR_PREFIX: &str = "Error analyzing image:";

/// Runs the analysis pipeline against an injected vision client.
pub struct HairAnalyzer {
    client: Arc<dyn VisionClient>,
    builder: RequestBuilder,
    score_policy: ScorePolicy,
    jpeg_quality: u8,
}

impl HairAnalyzer {
    pub fn new(client: Arc<dyn VisionClient>, builder: RequestBuilder) -> Self {
        Self {
            client,
            builder,
            score_policy: ScorePolicy::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_score_policy(mut self, policy: ScorePolicy) -> Self {
        self.score_policy = policy;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn model(&self) -> &str {
        self.builder.model()
    }

    pub fn provider(&self) -> &str {
        self.client.name()
    }

    /// Analyze `image` and return the typed result.
    pub async fn run(&self, image: &DynamicImage) -> Result<HairAnalysis> {
        let encoded = encode_jpeg(image, self.jpeg_quality)?;
        debug!(jpeg_bytes = encoded.byte_len, "Encoded image for request");

        let request = self.builder.build(&encoded);
        let response = self.client.complete(&request).await?;
        info!(
            provider = %response.provider,
            model = %response.model,
            tokens = response.tokens_used,
            latency_ms = response.latency_ms,
            "Model answered"
        );

        let analysis: HairAnalysis = response.parse()?;
        Ok(analysis.enforce_score(self.score_policy)?)
    }

    /// Analyze an optional image and return display text.
    ///
    /// Never fails: errors are logged and rendered as text.
    pub async fn analyze(&self, image: Option<&DynamicImage>) -> String {
        let Some(image) = image else {
            return NO_IMAGE_MESSAGE.to_string();
        };
        match self.run(image).await {
            Ok(analysis) => format_analysis(&analysis),
            Err(e) => self.failure(e),
        }
    }

    /// Decode raw upload bytes, then behave like [`HairAnalyzer::analyze`].
    pub async fn analyze_upload(&self, bytes: &[u8]) -> String {
        match decode_upload(bytes) {
            Ok(image) => self.analyze(image.as_ref()).await,
            Err(e) => self.failure(e),
        }
    }

    fn failure(&self, e: anyhow::Error) -> String {
        error!(error = ?e, provider = self.client.name(), "Error during analysis");
        format!("{ERROR_PREFIX} {}", redact_sensitive_data(&format!("{e:#}")))
    }
}
