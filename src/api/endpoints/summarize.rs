//! Plain-language summary endpoints (placeholder summarizer).

use axum::extract::Multipart;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::summarizer::{summarize_text, SummaryResponse};

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

/// `POST /summarize` — summarize raw text.
pub async fn text(Json(req): Json<SummarizeRequest>) -> Result<Json<SummaryResponse>, ApiError> {
    Ok(Json(summarize_text(&req.text)))
}

/// `POST /summarize-file` — summarize an uploaded text file.
/// Bytes are decoded lossily; this endpoint does not OCR.
pub async fn file(mut multipart: Multipart) -> Result<Json<SummaryResponse>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .ok_or_else(|| ApiError::BadRequest("Missing file upload.".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let content = String::from_utf8_lossy(&bytes);

    Ok(Json(summarize_text(&content)))
}
