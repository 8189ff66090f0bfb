//! Scan history persistence.
//!
//! Each scan stores the explained payload verbatim as a JSON blob; the
//! summary fields surfaced by `list_scans` are read back out of that blob,
//! not stored in their own columns.

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use serde_json::Value;

use super::DatabaseError;

/// One row of the scan history listing.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub id: i64,
    pub created_at: String,
    pub filename: Option<String>,
    pub count: Option<i64>,
    pub overall_summary: Option<String>,
}

/// A fully loaded scan record.
#[derive(Debug, Clone)]
pub struct ScanRecord {
    pub id: i64,
    pub created_at: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub ocr_text: String,
    /// Parsed `result_json` payload; an unparseable blob degrades to an
    /// empty object rather than an error.
    pub result: Value,
}

/// Insert a scan and return its id.
pub fn save_scan(
    conn: &Connection,
    filename: Option<&str>,
    content_type: Option<&str>,
    ocr_text: &str,
    result: &Value,
) -> Result<i64, DatabaseError> {
    let created_at = chrono::Utc::now().to_rfc3339();
    let payload = serde_json::to_string(result)?;

    conn.execute(
        "INSERT INTO scans (created_at, filename, content_type, ocr_text, result_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![created_at, filename, content_type, ocr_text, payload],
    )?;

    Ok(conn.last_insert_rowid())
}

/// List scan summaries, newest first.
pub fn list_scans(conn: &Connection, limit: u32) -> Result<Vec<ScanSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, filename, result_json
         FROM scans
         ORDER BY id DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        let result_json: String = row.get(3)?;
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            result_json,
        ))
    })?;

    let mut summaries = Vec::new();
    for row in rows {
        let (id, created_at, filename, result_json) = row?;
        let parsed: Value = serde_json::from_str(&result_json).unwrap_or(Value::Null);
        summaries.push(ScanSummary {
            id,
            created_at,
            filename,
            count: parsed.get("count").and_then(Value::as_i64),
            overall_summary: parsed
                .get("overall_summary")
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }

    Ok(summaries)
}

/// Load one scan by id.
pub fn get_scan(conn: &Connection, scan_id: i64) -> Result<Option<ScanRecord>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, created_at, filename, content_type, ocr_text, result_json
             FROM scans
             WHERE id = ?1",
            params![scan_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;

    let Some((id, created_at, filename, content_type, ocr_text, result_json)) = row else {
        return Ok(None);
    };

    let result: Value =
        serde_json::from_str(&result_json).unwrap_or_else(|_| Value::Object(Default::default()));

    Ok(Some(ScanRecord {
        id,
        created_at,
        filename,
        content_type,
        ocr_text: ocr_text.unwrap_or_default(),
        result,
    }))
}
