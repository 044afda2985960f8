use crate::model::EntityChunk;
use regex::Regex;

/// Cut `text` into entity chunks at every header match.
///
/// `pattern` must be compiled in multi-line mode so `^` anchors at line
/// starts. Chunk `i` runs from match `i` to the start of match `i + 1`, the
/// last one to the end of the text. Text before the first match belongs to no
/// chunk. No matches means no chunks.
pub fn split_by_headers(text: &str, pattern: &Regex) -> Vec<EntityChunk> {
    let starts: Vec<(usize, &str)> = pattern
        .find_iter(text)
        .map(|m| (m.start(), m.as_str()))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &(start, matched))| {
            let end = starts.get(i + 1).map(|&(s, _)| s).unwrap_or(text.len());
            EntityChunk {
                header: header_line(matched),
                content: text[start..end].trim().to_string(),
            }
        })
        .collect()
}

/// Title line of a header match.
///
/// Several patterns look one line ahead (e.g. a race title followed by its
/// attribute line); only the first non-blank line names the entity.
fn header_line(matched: &str) -> String {
    matched
        .trim()
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
