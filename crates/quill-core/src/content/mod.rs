//! The markdown content pipeline: frontmatter parsing, excerpt
//! extraction, unique-slug generation, document import and post update.
//!
//! Everything here is synchronous string work plus a handful of
//! indexed repository lookups; no shared state survives between calls.

mod excerpt;
mod frontmatter;
mod import;
mod slug;
mod tags;
mod update;
mod validate;

pub use excerpt::{DEFAULT_EXCERPT_LENGTH, extract_excerpt};
pub use frontmatter::{FRONTMATTER_MARKER, Metadata, parse_frontmatter};
pub use import::{ImportOutcome, PostImporter, title_from_filename};
pub use slug::{generate_unique_slug, slug_from_title};
pub use tags::TagInput;
pub use update::{PostPatch, UpdateCoordinator};
pub use validate::{validate_new_post, validate_patch};
