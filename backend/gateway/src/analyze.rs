//! `POST /api/analyze`: one image in, display text out.

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use hairscope_understanding::ERROR_PREFIX;

use crate::server::GatewayState;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

fn text(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

/// Bytes of the `image` field, empty when the form has none.
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(IMAGE_FIELD) {
            return field.bytes().await;
        }
    }
    Ok(Bytes::new())
}

/// Always answers with text; failures are scoped to this submission.
pub async fn analyze(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let span = info_span!("submission", id = %Uuid::new_v4());
    async move {
        let mut multipart = match multipart {
            Ok(multipart) => multipart,
            Err(rejection) => {
                warn!(error = %rejection, "Request is not a multipart upload");
                return text(rejection.status(), format!("{ERROR_PREFIX} {}", rejection.body_text()));
            }
        };
        let bytes = match read_image_field(&mut multipart).await {
            Ok(bytes) => bytes,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                let limit = state.max_upload_bytes;
                warn!(limit, "Upload exceeds the body limit");
                return text(e.status(), format!("{ERROR_PREFIX} upload exceeds the {limit} byte limit"));
            }
            Err(e) => {
                warn!(error = %e, "Could not read upload");
                return text(e.status(), format!("{ERROR_PREFIX} {}", e.body_text()));
            }
        };
        info!(bytes = bytes.len(), "Processing submission");
        let output = state.analyzer.analyze_upload(&bytes).await;
        text(StatusCode::OK, output)
    }
    .instrument(span)
    .await
}
