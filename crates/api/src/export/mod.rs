//! Document export: PDF quotations and reports, XLSX reports.

pub mod documents;
pub mod pdf;
pub mod xlsx;

use axum::http::header;
use axum::response::{IntoResponse, Response};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Keep ASCII letters, digits, and dashes so the name is safe in a header.
/// Returns `placeholder` when nothing usable is left.
pub fn sanitize_filename(name: &str, placeholder: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    match cleaned.trim_matches('-') {
        "" => placeholder.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// A downloadable file response with `Content-Disposition: attachment`.
pub fn attachment(content_type: &'static str, filename: &str, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
