//! Field validation shared by import and update. Violations are always
//! collected in full, never reported one at a time.

use super::update::PostPatch;

pub const TITLE_MAX: usize = 255;
pub const SLUG_MAX: usize = 255;
pub const TAGS_MAX: usize = 500;

/// Validate the assembled fields of a new post.
pub fn validate_new_post(title: &str, slug: &str, tags: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push("Title is required".to_owned());
    }
    if title.chars().count() > TITLE_MAX {
        errors.push(format!("Title must be {TITLE_MAX} characters or less"));
    }
    if slug.chars().count() > SLUG_MAX {
        errors.push(format!("Slug must be {SLUG_MAX} characters or less"));
    }
    if let Some(tags) = tags {
        if tags.chars().count() > TAGS_MAX {
            errors.push(format!("Tags must be {TAGS_MAX} characters or less"));
        }
    }

    errors
}

/// Validate only the fields present in a partial update. Mirrors the
/// creation rules.
pub fn validate_patch(patch: &PostPatch) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(title) = patch.title.as_deref() {
        if title.trim().is_empty() {
            errors.push("Title is required".to_owned());
        }
        if title.chars().count() > TITLE_MAX {
            errors.push(format!("Title must be {TITLE_MAX} characters or less"));
        }
    }
    if let Some(slug) = patch.slug.as_deref() {
        if slug.chars().count() > SLUG_MAX {
            errors.push(format!("Slug must be {SLUG_MAX} characters or less"));
        }
    }
    if let Some(tags) = patch.tags.as_deref() {
        if tags.chars().count() > TAGS_MAX {
            errors.push(format!("Tags must be {TAGS_MAX} characters or less"));
        }
    }

    errors
}
