//! Frontmatter parsing: split a raw markdown document into a YAML
//! metadata mapping and the body with the header block stripped.

/// Marker line delimiting a frontmatter block.
pub const FRONTMATTER_MARKER: &str = "---";

/// Arbitrary key/value metadata from a frontmatter block. Commonly
/// carries `title`, `slug`, `excerpt`, `tags` and `published`.
pub type Metadata = serde_yaml::Mapping;

/// Parse an optional frontmatter block at the very start of `raw`.
///
/// A document may open with a `---` marker line, a YAML mapping, then a
/// closing `---` line; the body is everything after the closing marker.
/// No opening marker means empty metadata and the whole text as body.
///
/// Fails soft: a malformed block (no closing marker, invalid YAML,
/// non-mapping YAML) yields empty metadata and the original text
/// untouched. The document is never lost and this never errors.
pub fn parse_frontmatter(raw: &str) -> (Metadata, String) {
    let fallback = || (Metadata::new(), raw.to_owned());

    let mut lines = raw.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return fallback();
    };
    if first.trim_end() != FRONTMATTER_MARKER {
        return fallback();
    }

    // Locate the closing marker line, tracking byte offsets so the body
    // is returned byte-for-byte.
    let mut cursor = first.len();
    let mut close: Option<(usize, usize)> = None;
    for line in raw[first.len()..].split_inclusive('\n') {
        if line.trim_end() == FRONTMATTER_MARKER {
            close = Some((cursor, cursor + line.len()));
            break;
        }
        cursor += line.len();
    }
    let Some((yaml_end, body_start)) = close else {
        return fallback();
    };

    let yaml = &raw[first.len()..yaml_end];
    let body = raw[body_start..].to_owned();

    match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
        Ok(serde_yaml::Value::Mapping(metadata)) => (metadata, body),
        // An empty block between markers parses as null.
        Ok(serde_yaml::Value::Null) => (Metadata::new(), body),
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_without_header_is_all_body() {
        let raw = "Just some markdown.\n\nNo header here.";
        let (metadata, body) = parse_frontmatter(raw);
        assert!(metadata.is_empty());
        assert_eq!(body, raw);
    }

    #[test]
    fn parses_header_block() {
        let raw = "---\ntitle: Hello World\ntags:\n  - rust\n  - blog\n---\nBody text.";
        let (metadata, body) = parse_frontmatter(raw);
        assert_eq!(metadata.get("title").and_then(|v| v.as_str()), Some("Hello World"));
        assert_eq!(
            metadata.get("tags").and_then(|v| v.as_sequence()).map(|s| s.len()),
            Some(2)
        );
        assert_eq!(body, "Body text.");
    }

    #[test]
    fn missing_closing_marker_fails_soft() {
        let raw = "---\ntitle: Broken\nNever closed.";
        let (metadata, body) = parse_frontmatter(raw);
        assert!(metadata.is_empty());
        assert_eq!(body, raw);
    }

    #[test]
    fn invalid_yaml_fails_soft() {
        let raw = "---\n: [unbalanced\n---\nBody.";
        let (metadata, body) = parse_frontmatter(raw);
        assert!(metadata.is_empty());
        assert_eq!(body, raw);
    }

    #[test]
    fn non_mapping_yaml_fails_soft() {
        let raw = "---\n- just\n- a list\n---\nBody.";
        let (metadata, body) = parse_frontmatter(raw);
        assert!(metadata.is_empty());
        assert_eq!(body, raw);
    }

    #[test]
    fn empty_block_yields_empty_metadata() {
        let raw = "---\n---\nBody only.";
        let (metadata, body) = parse_frontmatter(raw);
        assert!(metadata.is_empty());
        assert_eq!(body, "Body only.");
    }

    #[test]
    fn empty_document() {
        let (metadata, body) = parse_frontmatter("");
        assert!(metadata.is_empty());
        assert_eq!(body, "");
    }

    #[test]
    fn crlf_markers_are_recognized() {
        let raw = "---\r\ntitle: Windows\r\n---\r\nBody.";
        let (metadata, body) = parse_frontmatter(raw);
        assert_eq!(metadata.get("title").and_then(|v| v.as_str()), Some("Windows"));
        assert_eq!(body, "Body.");
    }
}
