//! Persistence boundary.
//!
//! Handlers never see a concrete store. They are handed a [`Repositories`]
//! bundle holding one narrow trait object per entity.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Post persistence. Reads and writes touch a single row or a single page.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post; the store assigns `id` and `created_at`.
    async fn create_post(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Fails with [`RepoError::NotFound`] when the id is unknown.
    async fn get_post(&self, id: i64) -> Result<Post, RepoError>;

    /// One page of posts ordered by ascending id.
    async fn list_posts(&self, limit: u64, offset: u64) -> Result<Vec<Post>, RepoError>;

    async fn count_posts(&self) -> Result<u64, RepoError>;

    /// Replace the content of a post. Fails with [`RepoError::NotFound`] when
    /// the id is unknown.
    async fn update_post(&self, id: i64, content: &str) -> Result<Post, RepoError>;

    /// Fails with [`RepoError::NotFound`] when nothing was deleted.
    async fn delete_post(&self, id: i64) -> Result<(), RepoError>;
}

/// User persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`RepoError::Constraint`] when the user name is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, RepoError>;

    /// Look a user up by user name.
    async fn get_user(&self, user_name: &str) -> Result<User, RepoError>;

    /// One page of users ordered by creation time.
    async fn list_users(&self, limit: u64, offset: u64) -> Result<Vec<User>, RepoError>;
}

/// The full persistence boundary consumed by the services.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Use a single store that implements every repository.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PostRepository + UserRepository + 'static,
    {
        Self {
            posts: store.clone(),
            users: store,
        }
    }
}
