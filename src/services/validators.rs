use crate::api::middleware::error::{ApiError, ApiResult};
use base64::Engine;
use regex::Regex;
use std::sync::OnceLock;

/// Decoded profile images are capped at 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub fn validate_and_normalize_email(email: &str) -> ApiResult<String> {
    let trimmed = email.trim();

    if !email_address::EmailAddress::is_valid(trimmed) {
        return Err(ApiError::BadRequest(
            "Invalid email format. Must be in format user@domain.tld".to_string(),
        ));
    }

    // Additional validation: require a TLD (dot after @)
    if let Some(at_pos) = trimmed.find('@') {
        let domain_part = &trimmed[at_pos + 1..];
        if !domain_part.contains('.') {
            return Err(ApiError::BadRequest(
                "Invalid email format. Domain must include a TLD (e.g., .com, .org)".to_string(),
            ));
        }
    }

    // Normalize to lowercase for consistent storage
    Ok(trimmed.to_lowercase())
}

/// Badge numbers are 3-20 characters of letters, digits, and hyphens.
/// Normalized to uppercase so lookups are case-insensitive.
pub fn validate_and_normalize_employee_no(employee_no: &str) -> ApiResult<String> {
    static EMPLOYEE_NO_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EMPLOYEE_NO_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9-]{3,20}$").expect("Invalid employee_no regex"));

    let trimmed = employee_no.trim();

    if !re.is_match(trimmed) {
        return Err(ApiError::BadRequest(
            "Invalid employee ID. Use 3-20 letters, digits, or hyphens".to_string(),
        ));
    }

    Ok(trimmed.to_uppercase())
}

pub fn validate_required(value: &str, field: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

/// Validate a base64 image payload. Accepts a bare base64 string or a data
/// URL prefix (data:image/...;base64,). Callers store the payload as
/// received, so this only checks that it decodes and fits the size cap.
pub fn validate_image_payload(image: &str) -> ApiResult<()> {
    let encoded = match image.split_once(";base64,") {
        Some((prefix, rest)) => {
            if !prefix.starts_with("data:image/") {
                return Err(ApiError::BadRequest(
                    "Image must be a data:image/* payload".to_string(),
                ));
            }
            rest
        }
        None => image,
    };

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| ApiError::BadRequest("Image is not valid base64".to_string()))?;

    if decoded.is_empty() {
        return Err(ApiError::BadRequest("Image payload is empty".to_string()));
    }

    if decoded.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::BadRequest(
            "Image exceeds the 5 MiB limit".to_string(),
        ));
    }

    Ok(())
}
