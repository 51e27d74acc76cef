//! Use cases behind the HTTP handlers.
//!
//! Every mutating path runs the same sequence: validate input, fetch the
//! current row, check ownership, then write.

mod post_service;
mod user_service;

pub use post_service::PostService;
pub use user_service::{Registration, Session, UserService};

#[cfg(test)]
pub(crate) mod testing;
