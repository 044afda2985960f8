use crate::document::Document;
use crate::model::TocEntry;
use regex::Regex;
use std::sync::LazyLock;

/// "Introdução ........ 12"
static DOT_LEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\.{2,}\s*(\d+)\s*$").unwrap());

/// "Magias 178"
static SPACE_SEPARATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d+)\s*$").unwrap());

/// Parse the table of contents found on pages `start_page..=end_page`.
///
/// Lines that match neither grammar are skipped. Returns entries in line order;
/// an empty result is not an error.
pub fn parse_toc(doc: &Document, start_page: usize, end_page: usize) -> Vec<TocEntry> {
    let text = doc.pages_range(start_page, end_page);
    parse_toc_text(&text)
}

/// Parse TOC entries from already concatenated text.
pub fn parse_toc_text(text: &str) -> Vec<TocEntry> {
    text.lines().filter_map(parse_toc_line).collect()
}

fn parse_toc_line(raw: &str) -> Option<TocEntry> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    let caps = DOT_LEADER
        .captures(line)
        .or_else(|| SPACE_SEPARATED.captures(line))?;

    let title = caps.get(1)?.as_str().trim().to_string();
    let page: usize = caps.get(2)?.as_str().parse().ok()?;
    if title.is_empty() || page == 0 {
        return None;
    }

    Some(TocEntry {
        title,
        page,
        level: indent_level(raw),
    })
}

/// Nesting level from the leading whitespace of the untrimmed line.
fn indent_level(raw: &str) -> u8 {
    if raw.starts_with("    ") || raw.starts_with("\t\t") {
        2
    } else if raw.starts_with("  ") || raw.starts_with('\t') {
        1
    } else {
        0
    }
}
