//! # Quill Shared
//!
//! Request/response DTOs and the standard API envelope shared between
//! the server and any API clients.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
