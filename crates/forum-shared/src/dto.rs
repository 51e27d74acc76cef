//! Data Transfer Objects - request/response types for the API.
//!
//! Request types carry their validation rules; the server rejects a request
//! that fails them before any other work is done.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use forum_core::PageRequest;

fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric").with_message("must be alphanumeric".into()))
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Body of `POST /api/posts`. An `owner` field, if sent, is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "image is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "subtitle is required"))]
    pub subtitle: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// Body of `PUT /api/posts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// Path segment of the single-post routes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct PostPath {
    #[validate(range(min = 1, message = "id must be at least 1"))]
    pub id: i64,
}

/// Query string of `GET /api/posts`.
///
/// Bounds are the ones [`PageRequest`] enforces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[validate(schema(function = "page_window"))]
pub struct ListPostsQuery {
    pub page_id: i64,
    pub page_size: i64,
}

fn page_window(query: &ListPostsQuery) -> Result<(), ValidationError> {
    PageRequest::new(query.page_id, query.page_size)
        .map(|_| ())
        .map_err(|e| ValidationError::new("page_window").with_message(e.to_string().into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub owner: String,
    pub image: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Pagination envelope for post listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub current_page: u64,
    pub page_size: u64,
    pub last_page: u64,
    pub total_records: u64,
    pub posts: Vec<PostResponse>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Body of `POST /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, message = "user_name is required"),
        custom(function = "alphanumeric")
    )]
    pub user_name: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
}

/// A user's public information. The password hash is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        length(min = 1, message = "user_name is required"),
        custom(function = "alphanumeric")
    )]
    pub user_name: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Response containing a bearer token and the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}
