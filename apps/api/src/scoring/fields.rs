//! Field Extractor — pulls a single `Label: value` line out of a section's text.

/// Placeholder stored for any field the model's output did not yield.
pub const NOT_FOUND: &str = "Not found";

/// Returns the trimmed value following the first `label:` in `text`, if it is terminated by a
/// line break.
///
/// Matching is a plain substring search on the first occurrence, so a label repeated later in
/// the section is ignored.
pub fn find_field<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let needle = format!("{label}:");
    let start = text.find(&needle)? + needle.len();
    let end = start + text[start..].find('\n')?;
    Some(text[start..end].trim())
}

/// Like [`find_field`], substituting [`NOT_FOUND`] when the field cannot be located.
pub fn extract_field(text: &str, label: &str) -> String {
    find_field(text, label)
        .map(str::to_string)
        .unwrap_or_else(|| NOT_FOUND.to_string())
}
