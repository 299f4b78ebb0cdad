//! SeaORM entities.

pub mod admin_user;
pub mod post;
