//! Keyword normalization.
//!
//! A keyword is stored trimmed and lower-cased so that matching and the
//! (session, keyword) uniqueness constraint are both case-insensitive.

/// Normalize raw keyword text: trim, lower-case.
///
/// Returns `None` when nothing remains after trimming; empty keywords are
/// never stored.
pub fn normalize(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}
