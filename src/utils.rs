//! Utility functions for key normalization.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Normalize a comparison key: strip diacritics, lowercase, trim.
///
/// Topics, owner segments and contributor logins all compare through this, so
/// `"Acme"`, `"acme"` and `" ACME "` land on the same key.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks
/// 3. Lowercase and trim
#[cfg(feature = "unicode-normalization")]
pub fn normalize_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Lightweight normalization: lowercase and trim only.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize_key(value: &str) -> String {
    value.to_lowercase().trim().to_string()
}

#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// The owner segment of an `owner/name` identifier.
///
/// Identifiers without a slash are their own namespace, so the whole
/// identifier becomes the owner. The result is always normalized.
pub fn owner_key(full_name: &str) -> String {
    let owner = full_name.split('/').next().unwrap_or(full_name);
    normalize_key(owner)
}

/// Check an identifier has the `owner/name` shape with both parts non-empty.
pub fn is_qualified_name(full_name: &str) -> bool {
    let mut parts = full_name.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(owner), Some(name), None) if !owner.trim().is_empty() && !name.trim().is_empty()
    )
}
