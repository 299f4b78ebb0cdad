//! SeaORM repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use quill_core::domain::{AdminUser, Post};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, PostRepository};

use super::entity::admin_user::{self, Entity as AdminUserEntity};
use super::entity::post::{self, Entity as PostEntity};

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::RecordNotUpdated => RepoError::NotFound,
        other => {
            let msg = other.to_string();
            if msg.contains("duplicate") || msg.contains("unique") {
                RepoError::Constraint(msg)
            } else {
                RepoError::Query(msg)
            }
        }
    }
}

/// Postgres-backed post repository. The connection pool is shared
/// behind an `Arc`; `DatabaseConnection` itself is not `Clone` when
/// the mock backend is compiled in.
pub struct SeaOrmPostRepository {
    db: Arc<DbConn>,
}

impl SeaOrmPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Published.eq(true))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_title_or_slug(
        &self,
        title: &str,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(
                Condition::any()
                    .add(post::Column::Title.eq(title))
                    .add(post::Column::Slug.eq(slug)),
            )
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn slug_in_use(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        let mut query = PostEntity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(post::Column::Id.ne(id));
        }

        let result = query.one(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(result.is_some())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedOn)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_published(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find()
            .filter(post::Column::Published.eq(true))
            .order_by_desc(post::Column::CreatedOn);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let result = query.all(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let model: post::ActiveModel = post.into();
        let inserted = model.insert(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model: post::ActiveModel = post.into();
        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// Postgres-backed admin user repository.
pub struct SeaOrmAuthorRepository {
    db: Arc<DbConn>,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, RepoError> {
        let result = AdminUserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepoError> {
        tracing::debug!(username, "Finding admin user by username");

        let result = AdminUserEntity::find()
            .filter(admin_user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, author: AdminUser) -> Result<AdminUser, RepoError> {
        let model: admin_user::ActiveModel = author.into();
        let inserted = model.insert(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(inserted.into())
    }

    async fn update(&self, author: AdminUser) -> Result<AdminUser, RepoError> {
        let model: admin_user::ActiveModel = author.into();
        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(updated.into())
    }
}
