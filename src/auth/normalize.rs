//! Identity string normalization
//!
//! Department and role names arrive from the backend as free-form text,
//! including inconsistent casing, stray punctuation, and whitespace. Every
//! comparison in the access layer happens on the normalized form.

/// Normalize an identity fragment for comparison.
///
/// Lower-cases the input, replaces every maximal run of non-alphanumeric
/// characters with a single `-`, and trims leading/trailing `-`.
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

/// Normalize a nullable identity fragment; absent input normalizes to `""`.
pub fn normalize_opt(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}
