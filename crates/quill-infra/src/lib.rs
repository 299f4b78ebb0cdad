//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM/Postgres repositories and the auth services (Argon2 password
//! hashing, JWT access tokens, RFC 6238 TOTP verification).

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, RfcTotp};
pub use database::{DatabaseConfig, SeaOrmAuthorRepository, SeaOrmPostRepository, connect};
