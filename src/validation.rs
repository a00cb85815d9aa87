//! Pure validation helpers for todo text and identifiers.
//!
//! These accumulate every applicable error message rather than stopping at
//! the first, so the UI can show the full list at once. Existence checks
//! (does this id resolve to a record?) belong to the store, not here.

/// Maximum todo text length in characters, after trimming.
pub const MAX_TEXT_LEN: usize = 500;
/// Minimum todo text length in characters, after trimming.
pub const MIN_TEXT_LEN: usize = 2;

/// Outcome of [`validate_text`].
///
/// `sanitized_text` is always the trimmed input, valid or not, so callers
/// can inspect what would have been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub sanitized_text: String,
}

/// Check and sanitize todo text. Trims, then enforces length in
/// [`MIN_TEXT_LEN`, `MAX_TEXT_LEN`] characters.
pub fn validate_text(text: &str) -> TextValidation {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    let mut errors = Vec::new();

    if len == 0 {
        errors.push("Todo text cannot be empty".to_string());
    }
    if len > MAX_TEXT_LEN {
        errors.push(format!(
            "Todo text must be less than {} characters",
            MAX_TEXT_LEN
        ));
    }
    if len < MIN_TEXT_LEN {
        errors.push(format!(
            "Todo text must be at least {} characters",
            MIN_TEXT_LEN
        ));
    }

    TextValidation {
        is_valid: errors.is_empty(),
        errors,
        sanitized_text: trimmed.to_string(),
    }
}

/// True iff `id` is a non-empty string. Format is opaque by design.
pub fn validate_id(id: &str) -> bool {
    !id.is_empty()
}
