//! Slug derivation and the unique-slug probe.

use uuid::Uuid;

use crate::error::RepoError;
use crate::ports::PostRepository;

/// URL-safe base slug for a title: lowercase, non-alphanumeric runs
/// collapsed to a single `-`, trimmed.
pub fn slug_from_title(title: &str) -> String {
    slug::slugify(title)
}

/// Derive a slug from `title` that no other post currently uses.
///
/// The base slug is returned as-is if free; otherwise `{base}-1`,
/// `{base}-2`, ... until an unused candidate is found. The counter is
/// unbounded, so the probe always terminates. Each probe is a single
/// query, scoped to exclude `exclude` so regenerating the slug of an
/// existing post never collides with that post itself. Pure queries:
/// calling this twice without persisting returns the same value.
pub async fn generate_unique_slug(
    repo: &dyn PostRepository,
    title: &str,
    exclude: Option<Uuid>,
) -> Result<String, RepoError> {
    let base = slug_from_title(title);
    let mut candidate = base.clone();
    let mut counter: u64 = 1;

    while repo.slug_in_use(&candidate, exclude).await? {
        candidate = format!("{base}-{counter}");
        counter += 1;
    }

    Ok(candidate)
}
