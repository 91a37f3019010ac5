//! Bearer token authentication and role guards

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;
use uuid::Uuid;

use hms_core::domain::UserRole;

use crate::response::ApiResponse;
use crate::state::AppState;

/// Identity attached to the request once the token checks out.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| unauthorized("Authentication required"))
    }
}

/// Validates the `Authorization: Bearer` token and stores the caller's
/// identity in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token,
        None => return unauthorized("Missing or malformed Authorization header"),
    };

    let claims = match state.jwt.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Token rejected: {}", e);
            return unauthorized("Invalid or expired token");
        }
    };

    let role = match UserRole::from_str(&claims.role) {
        Some(role) => role,
        None => return unauthorized("Invalid or expired token"),
    };

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
        username: claims.sub,
        role,
    });

    next.run(request).await
}

/// Admin or receptionist only.
pub async fn require_staff(request: Request, next: Next) -> Response {
    require_roles(&[UserRole::Admin, UserRole::Receptionist], request, next).await
}

/// Admin only.
pub async fn require_admin(request: Request, next: Next) -> Response {
    require_roles(&[UserRole::Admin], request, next).await
}

async fn require_roles(allowed: &[UserRole], request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthUser>() {
        Some(user) if allowed.contains(&user.role) => next.run(request).await,
        Some(user) => {
            warn!(
                "Access denied for {} (role {})",
                user.username,
                user.role.as_str()
            );
            forbidden()
        }
        None => unauthorized("Authentication required"),
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error("UNAUTHORIZED", message)),
    )
        .into_response()
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<()>::error(
            "FORBIDDEN",
            "Insufficient permissions",
        )),
    )
        .into_response()
}
