use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// A line that opens a fenced block, optionally tagged `json`.
static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^[ \t]*```[ \t]*(?:json)?[ \t]*(?:\r?\n|$)").unwrap());

static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[ \t]*\r?$").unwrap());

static OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

static ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").unwrap());

/// Recover JSON from raw model output.
///
/// Handles markdown fences and prose around the payload. Returns `None` when
/// nothing in the text parses.
pub fn parse_response(raw: &str) -> Option<Value> {
    let unfenced = FENCE_OPEN.replacen(raw, 1, "");
    let cleaned = FENCE_CLOSE.replace_all(&unfenced, "");
    let text = cleaned.trim();

    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    [&*OBJECT, &*ARRAY]
        .into_iter()
        .flat_map(|re| re.find_iter(text))
        .find_map(|m| serde_json::from_str(m.as_str()).ok())
}
