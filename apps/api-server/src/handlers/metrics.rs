//! Prometheus exposition endpoint.

use actix_web::{HttpResponse, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/metrics
///
/// Requires a bearer token like the other operator-facing routes.
pub async fn metrics(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let (content_type, body) = state
        .metrics
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to encode metrics: {e}")))?;

    tracing::debug!(user = %identity.user_name, "Metrics scraped");

    Ok(HttpResponse::Ok().content_type(content_type).body(body))
}
