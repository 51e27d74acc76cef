//! In-memory store - used when no database is configured or reachable.
//!
//! Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use forum_core::domain::{NewPost, NewUser, Post, User};
use forum_core::error::RepoError;
use forum_core::ports::{PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    last_post_id: i64,
    /// Kept in insertion order, which is creation order.
    users: Vec<User>,
}

impl Tables {
    fn has_user(&self, user_name: &str) -> bool {
        self.users.iter().any(|u| u.user_name == user_name)
    }
}

/// Posts and users behind a single async `RwLock`.
///
/// Mirrors the relational constraints: user names are unique and a post
/// owner must be a registered user.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create_post(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.has_user(&post.owner) {
            return Err(RepoError::Constraint(format!(
                "posts.owner references unknown user {}",
                post.owner
            )));
        }

        tables.last_post_id += 1;
        let row = Post {
            id: tables.last_post_id,
            owner: post.owner,
            image: post.image,
            title: post.title,
            subtitle: post.subtitle,
            content: post.content,
            created_at: Utc::now(),
        };
        tables.posts.insert(row.id, row.clone());

        Ok(row)
    }

    async fn get_post(&self, id: i64) -> Result<Post, RepoError> {
        let tables = self.tables.read().await;
        tables.posts.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn list_posts(&self, limit: u64, offset: u64) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_posts(&self) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.len() as u64)
    }

    async fn update_post(&self, id: i64, content: &str) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.content = content.to_string();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;

        if tables.has_user(&user.user_name) {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint: user_name {}",
                user.user_name
            )));
        }

        let row = User {
            id: Uuid::new_v4(),
            user_name: user.user_name,
            hashed_password: user.hashed_password,
            full_name: user.full_name,
            email: user.email,
            created_at: Utc::now(),
        };
        tables.users.push(row.clone());

        Ok(row)
    }

    async fn get_user(&self, user_name: &str) -> Result<User, RepoError> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.user_name == user_name)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list_users(&self, limit: u64, offset: u64) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
