use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AdminUser, Post};
use crate::error::RepoError;

/// Post store. `create` and `update` are split so implementations can
/// issue an explicit insert vs update instead of guessing from the
/// primary key.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Published posts only - the public read path.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Duplicate pre-check for the importer: any post with this exact
    /// title OR this exact slug.
    async fn find_by_title_or_slug(&self, title: &str, slug: &str)
    -> Result<Option<Post>, RepoError>;

    /// Single-query slug probe. `exclude` removes the post being
    /// edited from the collision check so it never collides with
    /// itself.
    async fn slug_in_use(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError>;

    /// All posts, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Published posts, newest first, optionally limited.
    async fn list_published(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError>;

    async fn create(&self, post: Post) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Admin user store.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepoError>;

    async fn create(&self, author: AdminUser) -> Result<AdminUser, RepoError>;

    async fn update(&self, author: AdminUser) -> Result<AdminUser, RepoError>;
}
