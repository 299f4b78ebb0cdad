//! Excerpt extraction: a plain-text preview derived from raw markdown.

use std::sync::LazyLock;

use regex::Regex;

use super::frontmatter::FRONTMATTER_MARKER;

/// Default maximum excerpt length, in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

/// Inline-formatting characters stripped before measuring a line.
static FORMATTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_`\[\]()]").expect("formatting pattern"));

/// Extract a plain-text excerpt from markdown `content`.
///
/// Works on raw text lines, not a parsed AST: skip empty lines, `#`
/// headings and code fences, strip inline-formatting characters, and
/// take the first line whose cleaned form is longer than 10 characters.
/// The result is truncated to `max_length` characters with a trailing
/// `...` only when truncation happened. Returns an empty string when no
/// line qualifies.
pub fn extract_excerpt(content: &str, max_length: usize) -> String {
    if content.is_empty() {
        return String::new();
    }

    // A still-unstripped frontmatter block is skipped first.
    let mut content = content;
    if content.starts_with(FRONTMATTER_MARKER) {
        let parts: Vec<&str> = content.splitn(3, FRONTMATTER_MARKER).collect();
        if let [_, _, rest] = parts.as_slice() {
            content = rest;
        }
    }

    for line in content.trim().lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("```") {
            continue;
        }
        let clean = FORMATTING.replace_all(line, "");
        if clean.chars().count() > 10 {
            return truncate_chars(&clean, max_length);
        }
    }

    String::new()
}

fn truncate_chars(text: &str, max_length: usize) -> String {
    if text.chars().count() > max_length {
        let cut: String = text.chars().take(max_length).collect();
        format!("{cut}...")
    } else {
        text.to_owned()
    }
}
