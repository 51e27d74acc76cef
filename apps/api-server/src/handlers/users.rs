//! User handlers.

use actix_web::{HttpResponse, web};

use forum_core::domain::User;
use forum_core::services::Registration;
use forum_shared::dto::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};

use crate::middleware::error::AppResult;
use crate::middleware::validation::Valid;
use crate::state::AppState;

fn to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        user_name: user.user_name,
        full_name: user.full_name,
        email: user.email,
        created_at: user.created_at,
    }
}

/// POST /api/users
pub async fn create_user(
    state: web::Data<AppState>,
    Valid(web::Json(body)): Valid<web::Json<CreateUserRequest>>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .register(Registration {
            user_name: body.user_name,
            password: body.password,
            full_name: body.full_name,
            email: body.email,
        })
        .await?;

    Ok(HttpResponse::Created().json(to_response(user)))
}

/// POST /api/users/login
pub async fn login_user(
    state: web::Data<AppState>,
    Valid(web::Json(body)): Valid<web::Json<LoginRequest>>,
) -> AppResult<HttpResponse> {
    let session = state.users.login(&body.user_name, &body.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: session.access_token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in,
        user: to_response(session.user),
    }))
}
