//! Test doubles for the ports.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{NewPost, NewUser, Post, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, PasswordService, PostRepository, TokenClaims, TokenService, UserRepository,
};

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    next_post_id: i64,
    users: BTreeMap<String, User>,
    fail_next: Option<RepoError>,
}

/// Store backed by maps, with one-shot error injection.
#[derive(Default)]
pub struct FakeStore {
    tables: Mutex<Tables>,
}

impl FakeStore {
    /// Make the next repository call fail with `err`.
    pub fn fail_next_with(&self, err: RepoError) {
        self.tables.lock().unwrap().fail_next = Some(err);
    }

    pub fn post_count(&self) -> usize {
        self.tables.lock().unwrap().posts.len()
    }

    fn with<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, RepoError>,
    ) -> Result<T, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(err) = tables.fail_next.take() {
            return Err(err);
        }
        f(&mut *tables)
    }
}

#[async_trait]
impl PostRepository for FakeStore {
    async fn create_post(&self, post: NewPost) -> Result<Post, RepoError> {
        self.with(|t| {
            t.next_post_id += 1;
            let row = Post {
                id: t.next_post_id,
                owner: post.owner,
                image: post.image,
                title: post.title,
                subtitle: post.subtitle,
                content: post.content,
                created_at: Utc::now(),
            };
            t.posts.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn get_post(&self, id: i64) -> Result<Post, RepoError> {
        self.with(|t| t.posts.get(&id).cloned().ok_or(RepoError::NotFound))
    }

    async fn list_posts(&self, limit: u64, offset: u64) -> Result<Vec<Post>, RepoError> {
        self.with(|t| {
            Ok(t.posts
                .values()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        })
    }

    async fn count_posts(&self) -> Result<u64, RepoError> {
        self.with(|t| Ok(t.posts.len() as u64))
    }

    async fn update_post(&self, id: i64, content: &str) -> Result<Post, RepoError> {
        self.with(|t| {
            let post = t.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
            post.content = content.to_string();
            Ok(post.clone())
        })
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        self.with(|t| t.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound))
    }
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn create_user(&self, user: NewUser) -> Result<User, RepoError> {
        self.with(|t| {
            if t.users.contains_key(&user.user_name) {
                return Err(RepoError::Constraint("users_user_name_key".to_string()));
            }
            let row = User {
                id: Uuid::new_v4(),
                user_name: user.user_name,
                hashed_password: user.hashed_password,
                full_name: user.full_name,
                email: user.email,
                created_at: Utc::now(),
            };
            t.users.insert(row.user_name.clone(), row.clone());
            Ok(row)
        })
    }

    async fn get_user(&self, user_name: &str) -> Result<User, RepoError> {
        self.with(|t| t.users.get(user_name).cloned().ok_or(RepoError::NotFound))
    }

    async fn list_users(&self, limit: u64, offset: u64) -> Result<Vec<User>, RepoError> {
        self.with(|t| {
            Ok(t.users
                .values()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        })
    }
}

/// Reversible "hash" so tests can see the password was transformed.
pub struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn generate_token(&self, user_name: &str) -> Result<String, AuthError> {
        Ok(format!("token-for-{user_name}"))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let user_name = token
            .strip_prefix("token-for-")
            .ok_or_else(|| AuthError::InvalidToken(token.to_string()))?;
        Ok(TokenClaims {
            user_name: user_name.to_string(),
            issued_at: 0,
            expires_at: self.expiration_seconds(),
        })
    }

    fn expiration_seconds(&self) -> i64 {
        900
    }
}
