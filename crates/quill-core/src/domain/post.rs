use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A blog post. Title and slug are globally unique among posts; the
/// unique indexes at the storage layer are the authoritative guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub markdown_content: Option<String>,
    pub published: bool,
    /// Comma-joined serialization of the tag set. Use [`Post::tag_list`]
    /// and [`Post::set_tag_list`] to work with it as a list.
    pub tags: Option<String>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post with the required fields.
    pub fn new(author_id: Uuid, title: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            excerpt: None,
            markdown_content: None,
            published: false,
            tags: None,
            created_on: now,
            updated_on: now,
        }
    }

    /// Tags as an ordered list of trimmed, non-empty tokens.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Replace the tag set from a list. An empty list clears the column.
    pub fn set_tag_list(&mut self, tags: &[String]) {
        self.tags = if tags.is_empty() {
            None
        } else {
            Some(tags.join(", "))
        };
    }

    /// Canonical string form of `updated_on`, used both in API
    /// responses and in the optimistic-concurrency comparison. The
    /// conflict check is exact string equality over this token, not
    /// semantic time equality.
    pub fn concurrency_token(&self) -> String {
        self.updated_on.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_on = Utc::now();
    }
}
