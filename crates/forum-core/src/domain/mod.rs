//! Domain entities - the core business objects.

mod user;

mod post;

pub use post::{NewPost, Post, PostDraft};
pub use user::{NewUser, User};
