use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single admin author. Only an authentication subject and the
/// foreign-key target of posts; the content pipeline receives the
/// author id explicitly and never loads this entity itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    /// Base32 TOTP secret. Non-null means MFA is enabled.
    pub mfa_secret: Option<String>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl AdminUser {
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            mfa_secret: None,
            created_on: now,
            updated_on: now,
        }
    }

    pub fn is_mfa_enabled(&self) -> bool {
        self.mfa_secret.is_some()
    }
}
