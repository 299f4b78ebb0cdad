//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::content::{PostImporter, UpdateCoordinator};
use quill_core::ports::{
    AuthorRepository, PasswordService, PostRepository, TokenService, TotpVerifier,
};
use quill_infra::{
    Argon2PasswordService, JwtTokenService, RfcTotp, SeaOrmAuthorRepository, SeaOrmPostRepository,
    connect,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub importer: Arc<PostImporter>,
    pub updates: Arc<UpdateCoordinator>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub totp: Arc<dyn TotpVerifier>,
    /// Public base URL for feed links, without a trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Build the application state with the Postgres-backed
    /// implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, sea_orm::DbErr> {
        // Shared behind an Arc so both repositories use one pool.
        let db = Arc::new(connect(&config.database).await?);

        let posts: Arc<dyn PostRepository> = Arc::new(SeaOrmPostRepository::new(db.clone()));
        let authors: Arc<dyn AuthorRepository> = Arc::new(SeaOrmAuthorRepository::new(db));

        let state = Self {
            importer: Arc::new(PostImporter::new(posts.clone())),
            updates: Arc::new(UpdateCoordinator::new(posts.clone())),
            posts,
            authors,
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
            totp: Arc::new(RfcTotp::default()),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        };

        tracing::info!("Application state initialized");
        Ok(state)
    }
}
