//! # Quill Core
//!
//! The domain layer of the Quill blog engine.
//! This crate contains pure business logic with zero infrastructure
//! dependencies: the post/author entities, the repository and auth
//! ports, and the markdown content pipeline (frontmatter parsing,
//! excerpt extraction, slug generation, import and update).

pub mod content;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
