use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;

use crate::error::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Build a `200 OK` response that the browser saves as `filename`.
pub fn attachment(bytes: Vec<u8>, content_type: &str, filename: &str) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .header(header::CONTENT_DISPOSITION, attachment_disposition(filename))
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// `Content-Disposition: attachment` with an ASCII fallback name and an
/// RFC 5987 `filename*` for the exact one.
pub fn attachment_disposition(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\' | '/'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "report.pdf".to_string()
    } else {
        ascii_safe
    };

    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                String::from(b as char)
            }
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("attachment; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
