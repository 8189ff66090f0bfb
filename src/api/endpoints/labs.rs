//! Lab text analysis endpoints.
//!
//! All three take raw text in the request body and run the synchronous
//! analysis pipeline; nothing here touches storage.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::{explain, explain_terms, find_labs, find_terms};
use crate::analysis::{ClassifiedLab, ExplainReport};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct ParseResponse {
    pub count: usize,
    pub results: Vec<ClassifiedLab>,
}

#[derive(Serialize)]
pub struct TermsResponse {
    pub count: usize,
    pub terms: BTreeMap<String, String>,
}

/// `POST /parse-labs` — raw classified results for a block of text.
pub async fn parse(
    State(ctx): State<ApiContext>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, ApiError> {
    let results = find_labs(&req.text, &ctx.knowledge);
    Ok(Json(ParseResponse {
        count: results.len(),
        results,
    }))
}

/// `POST /explain-labs` — full explanation report for a block of text.
pub async fn explain_text(
    State(ctx): State<ApiContext>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<ExplainReport>, ApiError> {
    let results = find_labs(&req.text, &ctx.knowledge);
    Ok(Json(explain(results)))
}

/// `POST /explain-terms` — abbreviations found in the text, expanded.
pub async fn terms(Json(req): Json<ParseRequest>) -> Result<Json<TermsResponse>, ApiError> {
    let found = find_terms(&req.text);
    let terms = explain_terms(found.iter().copied());
    Ok(Json(TermsResponse {
        count: terms.len(),
        terms,
    }))
}
