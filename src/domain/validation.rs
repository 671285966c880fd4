//! Input validation at the domain boundary
//!
//! Config payloads are intentionally schema-free; validation here is
//! limited to key allow-listing and size limits. Shape validation of a
//! payload happens at its point of use (see hot_search.rs).

use crate::contract::PlatformError;

/// Config types the admin surface may write.
///
/// `app_mode` is internal to the mode resolver and deliberately absent:
/// it is only writable through the dedicated mode endpoint.
pub const KNOWN_CONFIG_KEYS: &[&str] = &[
    "hot_searches",
    "filter_options",
    "banner_images",
    "service_categories",
    "districts",
    "tags",
    "promotion_texts",
    "contact_info",
    "app_settings",
];

pub fn validate_config_key(key: &str) -> Result<(), PlatformError> {
    if key.is_empty() {
        return Err(PlatformError::validation("key", "key cannot be empty"));
    }

    if !KNOWN_CONFIG_KEYS.contains(&key) {
        return Err(PlatformError::validation(
            "key",
            format!("unknown config type '{}'", key),
        ));
    }

    Ok(())
}

/// Reject oversized payloads before they reach the backend.
pub fn validate_payload_size(
    payload: &serde_json::Value,
    max_bytes: usize,
) -> Result<(), PlatformError> {
    let size = serde_json::to_vec(payload)
        .map(|v| v.len())
        .map_err(|_| PlatformError::validation("payload", "payload is not serializable"))?;

    if size > max_bytes {
        return Err(PlatformError::validation(
            "payload",
            format!("payload is {} bytes, limit is {}", size, max_bytes),
        ));
    }

    Ok(())
}

/// A required string field must be present and non-blank.
pub fn require_field(field: &str, value: &str) -> Result<(), PlatformError> {
    if value.trim().is_empty() {
        return Err(PlatformError::validation(
            field,
            format!("{} is required", field),
        ));
    }
    Ok(())
}

/// Review overall score must be 1-5.
pub fn validate_score(overall: u8) -> Result<(), PlatformError> {
    if !(1..=5).contains(&overall) {
        return Err(PlatformError::validation(
            "overall",
            format!("score must be between 1 and 5, got {}", overall),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_keys_accepted() {
        for key in KNOWN_CONFIG_KEYS {
            assert!(validate_config_key(key).is_ok());
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(validate_config_key("who_knows").is_err());
        assert!(validate_config_key("").is_err());
        // app_mode is writable only through the mode endpoint
        assert!(validate_config_key("app_mode").is_err());
    }

    #[test]
    fn test_payload_size_limit() {
        let small = json!({"items": []});
        assert!(validate_payload_size(&small, 1024).is_ok());

        let big = json!({"blob": "x".repeat(2048)});
        assert!(validate_payload_size(&big, 1024).is_err());
    }

    #[test]
    fn test_require_field() {
        assert!(require_field("name", "Gangnam Beauty").is_ok());
        assert!(require_field("name", "").is_err());
        assert!(require_field("name", "   ").is_err());
    }

    #[test]
    fn test_score_range() {
        assert!(validate_score(1).is_ok());
        assert!(validate_score(5).is_ok());
        assert!(validate_score(0).is_err());
        assert!(validate_score(6).is_err());
    }
}
