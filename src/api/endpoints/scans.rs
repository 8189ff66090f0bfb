//! Image scanning and scan history endpoints.

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analysis::{explain, find_labs};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::extraction::basic_cleanup;

/// Characters of OCR text echoed back to the client.
const OCR_PREVIEW_CHARS: usize = 800;

const DEFAULT_LIST_LIMIT: u32 = 50;

#[derive(Deserialize)]
pub struct ScansQuery {
    pub limit: Option<u32>,
}

/// `POST /scan-image` — OCR an uploaded image, analyze the text, persist
/// the scan, and return the explanation payload.
pub async fn scan_image(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .ok_or_else(|| ApiError::BadRequest("Missing file upload.".to_string()))?;

    let filename = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);

    if !content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("image/"))
    {
        return Err(ApiError::BadRequest(format!(
            "Please upload an image file (received {}).",
            content_type.as_deref().unwrap_or("no content type")
        )));
    }

    let image_bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let extracted = ctx.ocr.ocr_image(&image_bytes)?;
    let text = basic_cleanup(&extracted);

    tracing::debug!(
        filename = filename.as_deref().unwrap_or("<unnamed>"),
        chars = text.len(),
        "scan OCR complete"
    );

    let report = explain(find_labs(&text, &ctx.knowledge));
    let mut output =
        serde_json::to_value(&report).map_err(|e| ApiError::Internal(e.to_string()))?;
    output["ocr_text_preview"] = Value::String(text.chars().take(OCR_PREVIEW_CHARS).collect());

    let conn = ctx.open_db()?;
    let scan_id = repository::save_scan(
        &conn,
        filename.as_deref(),
        content_type.as_deref(),
        &text,
        &output,
    )?;

    output["scan_id"] = Value::from(scan_id);
    Ok(Json(output))
}

/// `GET /scans` — scan history summaries, newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<ScansQuery>,
) -> Result<Json<Value>, ApiError> {
    let conn = ctx.open_db()?;
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let results = repository::list_scans(&conn, limit)?;
    Ok(Json(json!({ "count": results.len(), "results": results })))
}

/// `GET /scans/:id` — one stored scan with its full payload.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(scan_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let conn = ctx.open_db()?;
    let record = repository::get_scan(&conn, scan_id)?
        .ok_or_else(|| ApiError::NotFound("Scan not found.".to_string()))?;

    let mut out = json!({
        "id": record.id,
        "created_at": record.created_at,
        "filename": record.filename,
        "content_type": record.content_type,
        "ocr_text": record.ocr_text,
        "ocr_text_preview": record.ocr_text.chars().take(OCR_PREVIEW_CHARS).collect::<String>(),
    });

    // The stored payload is merged over the base fields.
    if let Some(payload) = record.result.as_object() {
        for (key, value) in payload {
            out[key.as_str()] = value.clone();
        }
    }

    Ok(Json(out))
}
