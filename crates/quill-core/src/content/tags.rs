//! Tag normalization: frontmatter may carry tags as a YAML sequence, a
//! plain string, or anything else. The shape is pinned down as a small
//! variant type instead of being inspected ad hoc at the use site.

use serde_yaml::Value;

/// The shape tags arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagInput {
    /// A YAML sequence: joined with `", "`, elements trimmed, empty
    /// elements dropped.
    List(Vec<String>),
    /// A plain string: passed through unchanged.
    Text(String),
    /// Anything else: no tags.
    Absent,
}

impl TagInput {
    /// Classify a frontmatter `tags` value.
    pub fn from_metadata(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Sequence(items)) => {
                TagInput::List(items.iter().filter_map(scalar_to_string).collect())
            }
            Some(Value::String(text)) => TagInput::Text(text.clone()),
            _ => TagInput::Absent,
        }
    }

    /// Normalize to the stored comma-joined form. `None` means the tags
    /// column stays empty.
    pub fn normalize(self) -> Option<String> {
        match self {
            TagInput::List(items) => {
                let joined = items
                    .iter()
                    .map(|tag| tag.trim())
                    .filter(|tag| !tag.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                (!joined.is_empty()).then_some(joined)
            }
            TagInput::Text(text) => Some(text),
            TagInput::Absent => None,
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
