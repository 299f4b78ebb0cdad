//! Admin login handler.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{AuthResponse, LoginRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/auth/login
///
/// Password check first, then the TOTP step when MFA is enabled for
/// the account. All failures look the same to the caller.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let admin = state
        .authors
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = state
        .passwords
        .verify(&req.password, &admin.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    if let Some(secret) = admin.mfa_secret.as_deref() {
        let Some(code) = req.totp_code.as_deref() else {
            tracing::debug!(username = %admin.username, "MFA code missing");
            return Err(AppError::Unauthorized);
        };
        let accepted = state
            .totp
            .verify(secret, code)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if !accepted {
            tracing::debug!(username = %admin.username, "MFA code rejected");
            return Err(AppError::Unauthorized);
        }
    }

    let token = state
        .tokens
        .generate_token(admin.id, &admin.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds() as u64,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use async_trait::async_trait;
    use uuid::Uuid;

    use quill_core::content::{PostImporter, UpdateCoordinator};
    use quill_core::domain::{AdminUser, Post};
    use quill_core::error::RepoError;
    use quill_core::ports::{
        AuthError, AuthorRepository, PasswordService, PostRepository, TotpVerifier,
    };
    use quill_infra::{JwtConfig, JwtTokenService};

    use super::*;

    struct NoPosts;

    #[async_trait]
    impl PostRepository for NoPosts {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }

        async fn find_published_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }

        async fn find_by_title_or_slug(
            &self,
            _title: &str,
            _slug: &str,
        ) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }

        async fn slug_in_use(&self, _slug: &str, _exclude: Option<Uuid>) -> Result<bool, RepoError> {
            Ok(false)
        }

        async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn list_published(&self, _limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn create(&self, post: Post) -> Result<Post, RepoError> {
            Ok(post)
        }

        async fn update(&self, post: Post) -> Result<Post, RepoError> {
            Ok(post)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    struct OneAuthor(AdminUser);

    #[async_trait]
    impl AuthorRepository for OneAuthor {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, RepoError> {
            Ok((self.0.id == id).then(|| self.0.clone()))
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepoError> {
            Ok((self.0.username == username).then(|| self.0.clone()))
        }

        async fn create(&self, author: AdminUser) -> Result<AdminUser, RepoError> {
            Ok(author)
        }

        async fn update(&self, author: AdminUser) -> Result<AdminUser, RepoError> {
            Ok(author)
        }
    }

    /// Stores passwords verbatim so tests control the comparison.
    struct PlainPasswords;

    impl PasswordService for PlainPasswords {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(password.to_owned())
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(password == hash)
        }
    }

    struct FixedTotp;

    impl TotpVerifier for FixedTotp {
        fn verify(&self, _secret: &str, code: &str) -> Result<bool, AuthError> {
            Ok(code == "287082")
        }
    }

    fn admin(mfa: bool) -> AdminUser {
        let mut user = AdminUser::new("quill_admin".into(), "letmein".into());
        if mfa {
            user.mfa_secret = Some("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ".into());
        }
        user
    }

    fn state_for(user: AdminUser) -> web::Data<AppState> {
        let posts: Arc<dyn PostRepository> = Arc::new(NoPosts);
        web::Data::new(AppState {
            importer: Arc::new(PostImporter::new(posts.clone())),
            updates: Arc::new(UpdateCoordinator::new(posts.clone())),
            posts,
            authors: Arc::new(OneAuthor(user)),
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "test-secret".into(),
                expiration_hours: 1,
                issuer: "quill-test".into(),
            })),
            passwords: Arc::new(PlainPasswords),
            totp: Arc::new(FixedTotp),
            base_url: "http://localhost:8080".into(),
        })
    }

    fn request(password: &str, totp_code: Option<&str>) -> web::Json<LoginRequest> {
        web::Json(LoginRequest {
            username: "quill_admin".into(),
            password: password.into(),
            totp_code: totp_code.map(str::to_owned),
        })
    }

    #[tokio::test]
    async fn valid_credentials_yield_a_token() {
        let response = login(state_for(admin(false)), request("letmein", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        use actix_web::ResponseError;

        let err = login(state_for(admin(false)), request("wrong", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_username_is_unauthorized() {
        let state = state_for(admin(false));
        let body = web::Json(LoginRequest {
            username: "nobody".into(),
            password: "letmein".into(),
            totp_code: None,
        });
        assert!(matches!(login(state, body).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn mfa_enabled_without_code_is_unauthorized() {
        let result = login(state_for(admin(true)), request("letmein", None)).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn mfa_enabled_with_wrong_code_is_unauthorized() {
        let result = login(state_for(admin(true)), request("letmein", Some("000000"))).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn mfa_enabled_with_correct_code_logs_in() {
        let response = login(state_for(admin(true)), request("letmein", Some("287082")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
