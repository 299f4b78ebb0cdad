//! Database connection management and repository implementations.

mod connections;
pub mod entity;
mod repos;

pub use connections::{DatabaseConfig, connect};
pub use repos::{SeaOrmAuthorRepository, SeaOrmPostRepository};
