use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a title to a stable snake_case key.
///
/// Steps:
/// 1. Decompose (NFD) and drop combining marks: "Inabalável" -> "Inabalavel"
/// 2. Lowercase
/// 3. Drop every character that is not ASCII alphanumeric, whitespace or `_`
/// 4. Collapse whitespace/underscore runs into one `_`, trimmed at both ends
///
/// Underscores count as separators, so `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    let mut result = String::with_capacity(folded.len());
    let mut pending_sep = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !result.is_empty() {
                result.push('_');
            }
            pending_sep = false;
            result.push(c);
        } else if c.is_whitespace() || c == '_' {
            pending_sep = true;
        }
        // anything else is dropped without acting as a separator
    }

    result
}
