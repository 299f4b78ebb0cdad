//! The post update coordinator: partial updates with author-match
//! authorization and opt-in optimistic concurrency.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::PostRepository;

use super::validate::validate_patch;

/// Partial field map for an update. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub markdown_content: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<String>,
}

/// Applies permitted field changes to an existing post. Either every
/// supplied field is applied or none is.
pub struct UpdateCoordinator {
    posts: Arc<dyn PostRepository>,
}

impl UpdateCoordinator {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Update `post_id` on behalf of `actor_id`.
    ///
    /// Check order is fixed: not-found, author match, concurrency
    /// token, slug uniqueness, field validation, then the mutation.
    /// `last_known_update` is an opt-in: when supplied it must be
    /// byte-equal to the post's current [`Post::concurrency_token`];
    /// when absent the conflict check is skipped.
    pub async fn update(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        patch: PostPatch,
        last_known_update: Option<&str>,
    ) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(post_id)
            .await
            .map_err(DomainError::from)?
            .ok_or(DomainError::NotFound {
                entity: "Post",
                id: post_id,
            })?;

        // Author match comes before everything else, even field
        // validation of an otherwise-invalid request.
        if post.author_id != actor_id {
            return Err(DomainError::Forbidden);
        }

        if let Some(token) = last_known_update {
            if post.concurrency_token() != token {
                return Err(DomainError::Conflict(
                    "Post has been modified since last load".to_owned(),
                ));
            }
        }

        if let Some(slug) = patch.slug.as_deref() {
            if slug != post.slug
                && self
                    .posts
                    .slug_in_use(slug, Some(post.id))
                    .await
                    .map_err(DomainError::from)?
            {
                return Err(DomainError::Duplicate(format!(
                    "Slug '{slug}' is already in use"
                )));
            }
        }

        let errors = validate_patch(&patch);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(slug) = patch.slug {
            post.slug = slug;
        }
        if let Some(excerpt) = patch.excerpt {
            post.excerpt = (!excerpt.is_empty()).then_some(excerpt);
        }
        if let Some(markdown_content) = patch.markdown_content {
            post.markdown_content = (!markdown_content.is_empty()).then_some(markdown_content);
        }
        if let Some(published) = patch.published {
            post.published = published;
        }
        if let Some(tags) = patch.tags {
            post.tags = (!tags.is_empty()).then_some(tags);
        }
        post.touch();

        self.posts.update(post).await.map_err(DomainError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::MemoryPosts;

    fn seeded() -> (Arc<MemoryPosts>, Post, Uuid) {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, "Original".into(), "original".into());
        post.markdown_content = Some("Body.".into());
        let repo = Arc::new(MemoryPosts::with(vec![post.clone()]));
        (repo, post, author)
    }

    #[tokio::test]
    async fn applies_supplied_fields_and_bumps_timestamp() {
        let (repo, post, author) = seeded();
        let coordinator = UpdateCoordinator::new(repo.clone());

        let updated = coordinator
            .update(
                post.id,
                author,
                PostPatch {
                    title: Some("Renamed".into()),
                    published: Some(true),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert!(updated.published);
        // Untouched fields survive.
        assert_eq!(updated.slug, "original");
        assert_eq!(updated.markdown_content.as_deref(), Some("Body."));
        assert!(updated.updated_on >= post.updated_on);
        assert_eq!(repo.get(post.id).unwrap().title, "Renamed");
    }

    #[tokio::test]
    async fn stale_concurrency_token_is_a_conflict() {
        let (repo, post, author) = seeded();
        let coordinator = UpdateCoordinator::new(repo.clone());

        let result = coordinator
            .update(
                post.id,
                author,
                PostPatch {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
                Some("2001-01-01T00:00:00.000000Z"),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(repo.get(post.id).unwrap().title, "Original");
    }

    #[tokio::test]
    async fn matching_concurrency_token_passes() {
        let (repo, post, author) = seeded();
        let coordinator = UpdateCoordinator::new(repo);
        let token = post.concurrency_token();

        let updated = coordinator
            .update(
                post.id,
                author,
                PostPatch {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
                Some(&token),
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn foreign_actor_is_forbidden_before_validation() {
        let (repo, post, _author) = seeded();
        let coordinator = UpdateCoordinator::new(repo.clone());

        // The patch is also invalid; forbidden must win anyway.
        let result = coordinator
            .update(
                post.id,
                Uuid::new_v4(),
                PostPatch {
                    title: Some("".into()),
                    ..Default::default()
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden)));
        assert_eq!(repo.get(post.id).unwrap().title, "Original");
    }

    #[tokio::test]
    async fn slug_collision_with_another_post_is_rejected() {
        let (repo, post, author) = seeded();
        let other = Post::new(author, "Other".into(), "taken".into());
        repo.create(other).await.unwrap();
        let coordinator = UpdateCoordinator::new(repo.clone());

        let result = coordinator
            .update(
                post.id,
                author,
                PostPatch {
                    slug: Some("taken".into()),
                    ..Default::default()
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(DomainError::Duplicate(_))));
        assert_eq!(repo.get(post.id).unwrap().slug, "original");
    }

    #[tokio::test]
    async fn keeping_the_same_slug_is_not_a_collision() {
        let (repo, post, author) = seeded();
        let coordinator = UpdateCoordinator::new(repo);

        let updated = coordinator
            .update(
                post.id,
                author,
                PostPatch {
                    slug: Some("original".into()),
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "original");
    }

    #[tokio::test]
    async fn validation_failures_leave_the_post_unchanged() {
        let (repo, post, author) = seeded();
        let coordinator = UpdateCoordinator::new(repo.clone());

        let result = coordinator
            .update(
                post.id,
                author,
                PostPatch {
                    title: Some("x".repeat(300)),
                    tags: Some("t".repeat(600)),
                    ..Default::default()
                },
                None,
            )
            .await;

        match result {
            Err(DomainError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation errors, got {other:?}"),
        }
        assert_eq!(repo.get(post.id).unwrap().title, "Original");
    }

    #[tokio::test]
    async fn unknown_post_is_not_found() {
        let (repo, _post, author) = seeded();
        let coordinator = UpdateCoordinator::new(repo);

        let result = coordinator
            .update(Uuid::new_v4(), author, PostPatch::default(), None)
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
