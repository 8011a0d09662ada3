//! Validation helpers and constants for API handlers

use regex::Regex;

lazy_static::lazy_static! {
    /// E.164 phone number validation regex
    /// A leading plus sign followed by digits only
    pub static ref PHONE_E164_REGEX: Regex = Regex::new(r"^\+[0-9]+$").unwrap();
}

/// Normalize an optional phone number for the identity provider.
///
/// Blank input counts as absent. A trimmed value that is not in E.164
/// form is dropped with a warning so that registration can proceed
/// without it.
pub fn normalize_phone(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if PHONE_E164_REGEX.is_match(trimmed) {
        Some(trimmed.to_string())
    } else {
        tracing::warn!(phone = %trimmed, "Phone number is not in E.164 format, omitting");
        None
    }
}
