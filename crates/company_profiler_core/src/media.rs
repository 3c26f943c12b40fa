//! crates/company_profiler_core/src/media.rs
//!
//! Client-side pre-validation for logo image uploads. Rejections happen
//! synchronously, before any network call is attempted.

use crate::ports::{PortError, PortResult};

/// MIME types accepted for logo uploads.
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Checks the file's MIME type against the allow-list and its size against
/// the configured cap. Returns `PortError::Validation` with a user-facing
/// message on rejection.
pub fn validate_image(mime: &str, size_bytes: u64, max_size_mb: u64) -> PortResult<()> {
    if !ALLOWED_IMAGE_TYPES.contains(&mime) {
        return Err(PortError::Validation(format!(
            "Unsupported file type. Allowed types: {}",
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }

    let max_bytes = max_size_mb * 1024 * 1024;
    if size_bytes > max_bytes {
        return Err(PortError::Validation(format!(
            "File too large. Maximum size: {max_size_mb}MB"
        )));
    }

    Ok(())
}

/// Best-effort MIME guess from a file name, for callers that only have a
/// path to offer.
pub fn mime_for_file_name(name: &str) -> Option<&'static str> {
    let extension = name.rsplit('.').next()?.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
