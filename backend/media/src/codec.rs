//! Upload decoding and JPEG re-encoding for request payloads.

use image::{codecs::jpeg::JpegEncoder, DynamicImage};
use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use hairscope_core::{AnalysisError, ImagePayload};
use tracing::debug;

pub use hairscope_core::DEFAULT_JPEG_QUALITY;

/// A JPEG image held as base64 text.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub mime_type: &'static str,
    pub base64: String,
    pub byte_len: usize,
}

impl EncodedImage {
    pub fn to_payload(&self) -> ImagePayload {
        ImagePayload {
            mime_type: self.mime_type.to_string(),
            base64: self.base64.clone(),
        }
    }
}

/// Decode uploaded bytes into a bitmap.
///
/// Empty input means no image was supplied and yields `Ok(None)`.
pub fn decode_upload(bytes: &[u8]) -> Result<Option<DynamicImage>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let format = image::guess_format(bytes)
        .map_err(|_| AnalysisError::UnsupportedMedia("upload is not a recognised image".into()))?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AnalysisError::ImageDecode(e.to_string()))?;
    debug!(
        mime = format.to_mime_type(),
        width = img.width(),
        height = img.height(),
        "Decoded upload"
    );
    Ok(Some(img))
}

/// Re-serialize `img` as JPEG at `quality` (1-100).
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<EncodedImage> {
    // JPEG carries no alpha channel.
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .map_err(|e| AnalysisError::ImageEncode(e.to_string()))?;

    debug!(bytes = buf.len(), quality, "Encoded image as JPEG");
    Ok(EncodedImage {
        mime_type: "image/jpeg",
        base64: STANDARD.encode(&buf),
        byte_len: buf.len(),
    })
}
