//! Domain entities - the core business objects.

mod author;
mod post;

pub use author::AdminUser;
pub use post::Post;
