//! The post importer: turn an uploaded markdown file into a persisted
//! post, with validation and duplicate detection.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;
use crate::ports::PostRepository;

use super::excerpt::{DEFAULT_EXCERPT_LENGTH, extract_excerpt};
use super::frontmatter::parse_frontmatter;
use super::slug::generate_unique_slug;
use super::tags::TagInput;
use super::validate::validate_new_post;

/// Tri-state import result. `success == false` always carries a
/// human-readable message and never a post.
#[derive(Debug)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
    pub post: Option<Post>,
}

impl ImportOutcome {
    fn succeeded(message: String, post: Post) -> Self {
        Self {
            success: true,
            message,
            post: Some(post),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            post: None,
        }
    }
}

/// Orchestrates frontmatter parsing, slug generation and excerpt
/// extraction to import one uploaded document.
pub struct PostImporter {
    posts: Arc<dyn PostRepository>,
}

impl PostImporter {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Import a document. Failures are reported, never raised: every
    /// fault comes back as an [`ImportOutcome`] with `success == false`.
    pub async fn import(&self, bytes: &[u8], filename: &str, author_id: Uuid) -> ImportOutcome {
        let Ok(text) = std::str::from_utf8(bytes) else {
            return ImportOutcome::failed(
                "Unable to decode file. Please ensure it's a UTF-8 text file.",
            );
        };

        match self.build_and_persist(text, filename, author_id).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(filename, error = %err, "document import failed");
                ImportOutcome::failed(format!("Error processing file: {err}"))
            }
        }
    }

    async fn build_and_persist(
        &self,
        text: &str,
        filename: &str,
        author_id: Uuid,
    ) -> Result<ImportOutcome, RepoError> {
        let (metadata, body) = parse_frontmatter(text);

        let title = metadata
            .get("title")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .unwrap_or_else(|| title_from_filename(filename));

        let slug = match metadata
            .get("slug")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
        {
            Some(slug) => slug.to_owned(),
            None => generate_unique_slug(self.posts.as_ref(), &title, None).await?,
        };

        let excerpt = metadata
            .get("excerpt")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| extract_excerpt(&body, DEFAULT_EXCERPT_LENGTH));

        let published = metadata
            .get("published")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let tags = TagInput::from_metadata(metadata.get("tags")).normalize();

        let errors = validate_new_post(&title, &slug, tags.as_deref());
        if !errors.is_empty() {
            return Ok(ImportOutcome::failed(errors.join("; ")));
        }

        let duplicate_message =
            format!("Post with title '{title}' or slug '{slug}' already exists");

        // Best-effort fast path; the unique indexes remain the real guard.
        if self.posts.find_by_title_or_slug(&title, &slug).await?.is_some() {
            return Ok(ImportOutcome::failed(duplicate_message));
        }

        let mut post = Post::new(author_id, title.clone(), slug);
        post.excerpt = (!excerpt.is_empty()).then_some(excerpt);
        post.markdown_content = Some(body);
        post.published = published;
        post.tags = tags;

        let post = match self.posts.create(post).await {
            Ok(post) => post,
            // A concurrent insert slipped between the pre-check and
            // the insert; report it like any other duplicate.
            Err(RepoError::Constraint(_)) => {
                return Ok(ImportOutcome::failed(duplicate_message));
            }
            Err(err) => return Err(err),
        };

        let status = if published { "published" } else { "draft" };
        Ok(ImportOutcome::succeeded(
            format!("Successfully imported '{title}' as {status} post"),
            post,
        ))
    }
}

/// Derive a title from a filename: strip the extension, turn `_` and
/// `-` into spaces, capitalize each word.
pub fn title_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::MemoryPosts;

    fn importer(repo: Arc<MemoryPosts>) -> PostImporter {
        PostImporter::new(repo)
    }

    #[test]
    fn title_from_filename_variants() {
        assert_eq!(title_from_filename("my_first-post.md"), "My First Post");
        assert_eq!(title_from_filename("hello.md"), "Hello");
        assert_eq!(title_from_filename("ALREADY_LOUD.md"), "Already Loud");
        assert_eq!(title_from_filename("notes.txt"), "Notes");
    }

    #[tokio::test]
    async fn imports_document_with_frontmatter() {
        let repo = Arc::new(MemoryPosts::default());
        let bytes = b"---\ntitle: Hello World\n---\nBody text here that is long enough.";

        let outcome = importer(repo.clone())
            .import(bytes, "x.md", Uuid::new_v4())
            .await;

        assert!(outcome.success, "{}", outcome.message);
        let post = outcome.post.unwrap();
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.slug, "hello-world");
        assert!(!post.published);
        assert_eq!(
            post.excerpt.as_deref(),
            Some("Body text here that is long enough.")
        );
        assert_eq!(outcome.message, "Successfully imported 'Hello World' as draft post");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn title_falls_back_to_filename() {
        let repo = Arc::new(MemoryPosts::default());
        let outcome = importer(repo)
            .import(b"A body line that is certainly long enough.", "field_notes.md", Uuid::new_v4())
            .await;

        assert!(outcome.success);
        let post = outcome.post.unwrap();
        assert_eq!(post.title, "Field Notes");
        assert_eq!(post.slug, "field-notes");
    }

    #[tokio::test]
    async fn published_and_tags_are_taken_from_metadata() {
        let repo = Arc::new(MemoryPosts::default());
        let bytes =
            b"---\ntitle: Tagged\npublished: true\ntags:\n  - rust\n  - blog\n---\nA body line that is long enough.";

        let outcome = importer(repo).import(bytes, "t.md", Uuid::new_v4()).await;

        assert!(outcome.success);
        let post = outcome.post.unwrap();
        assert!(post.published);
        assert_eq!(post.tags.as_deref(), Some("rust, blog"));
        assert_eq!(outcome.message, "Successfully imported 'Tagged' as published post");
    }

    #[tokio::test]
    async fn rejects_non_utf8_bytes() {
        let repo = Arc::new(MemoryPosts::default());
        let outcome = importer(repo.clone())
            .import(&[0xff, 0xfe, 0x00], "bad.md", Uuid::new_v4())
            .await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.message,
            "Unable to decode file. Please ensure it's a UTF-8 text file."
        );
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn rejects_duplicate_title_or_slug() {
        let author = Uuid::new_v4();
        let repo = Arc::new(MemoryPosts::with(vec![Post::new(
            author,
            "Hello World".into(),
            "hello-world".into(),
        )]));

        let bytes = b"---\ntitle: Hello World\nslug: fresh-slug\n---\nBody text that is long enough.";
        let outcome = importer(repo.clone()).import(bytes, "x.md", author).await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.message,
            "Post with title 'Hello World' or slug 'fresh-slug' already exists"
        );
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn collects_all_validation_errors() {
        let repo = Arc::new(MemoryPosts::default());
        let long_title = "x".repeat(300);
        let doc = format!("---\ntitle: {long_title}\nslug: ok\ntags: '{}'\n---\nBody.", "t".repeat(600));

        let outcome = importer(repo.clone())
            .import(doc.as_bytes(), "x.md", Uuid::new_v4())
            .await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.message,
            "Title must be 255 characters or less; Tags must be 500 characters or less"
        );
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn blank_metadata_title_is_rejected() {
        let repo = Arc::new(MemoryPosts::default());
        let bytes = b"---\ntitle: '   '\n---\nBody text that is long enough.";

        let outcome = importer(repo).import(bytes, "x.md", Uuid::new_v4()).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Title is required");
    }

    #[tokio::test]
    async fn explicit_slug_in_metadata_wins() {
        let repo = Arc::new(MemoryPosts::default());
        let bytes = b"---\ntitle: Hello World\nslug: custom-slug\n---\nBody text that is long enough.";

        let outcome = importer(repo).import(bytes, "x.md", Uuid::new_v4()).await;
        assert_eq!(outcome.post.unwrap().slug, "custom-slug");
    }

    #[tokio::test]
    async fn generated_slug_avoids_existing_posts() {
        let author = Uuid::new_v4();
        let repo = Arc::new(MemoryPosts::with(vec![Post::new(
            author,
            "Other Title".into(),
            "hello-world".into(),
        )]));

        let bytes = b"---\ntitle: Hello World\n---\nBody text that is long enough.";
        let outcome = importer(repo).import(bytes, "x.md", author).await;

        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(outcome.post.unwrap().slug, "hello-world-1");
    }
}
