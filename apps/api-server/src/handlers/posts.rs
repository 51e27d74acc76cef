//! Post handlers.
//!
//! Mutating routes validate their input first, then authenticate, then hand
//! over to [`PostService`](forum_core::services::PostService), which checks
//! existence before ownership.

use actix_web::{FromRequest, HttpRequest, HttpResponse, web};

use forum_core::PageRequest;
use forum_core::domain::{Post, PostDraft};
use forum_shared::dto::{
    CreatePostRequest, ListPostsQuery, PostListResponse, PostPath, PostResponse,
    UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::middleware::validation::Valid;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        owner: post.owner,
        image: post.image,
        title: post.title,
        subtitle: post.subtitle,
        content: post.content,
        created_at: post.created_at,
    }
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    Valid(web::Json(body)): Valid<web::Json<CreatePostRequest>>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let identity = Identity::extract(&req).await?;

    let draft = PostDraft {
        image: body.image,
        title: body.title,
        subtitle: body.subtitle,
        content: body.content,
    };
    let post = state.posts.create(&identity.user_name, draft).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    Valid(path): Valid<web::Path<PostPath>>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.id).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /api/posts?page_id=&page_size=
pub async fn list_posts(
    state: web::Data<AppState>,
    Valid(web::Query(query)): Valid<web::Query<ListPostsQuery>>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .list(PageRequest::new(query.page_id, query.page_size)?)
        .await?
        .map(to_response);

    Ok(HttpResponse::Ok().json(PostListResponse {
        current_page: page.current_page,
        page_size: page.page_size,
        last_page: page.last_page,
        total_records: page.total_records,
        posts: page.items,
    }))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    Valid(path): Valid<web::Path<PostPath>>,
    Valid(web::Json(body)): Valid<web::Json<UpdatePostRequest>>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let identity = Identity::extract(&req).await?;

    let post = state
        .posts
        .update(&identity.user_name, path.id, &body.content)
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    Valid(path): Valid<web::Path<PostPath>>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let identity = Identity::extract(&req).await?;

    state.posts.delete(&identity.user_name, path.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
