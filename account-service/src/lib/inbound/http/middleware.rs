use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::UNAUTHENTICATED_MESSAGE;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

/// Extension type to store the verified token subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: EmailAddress,
}

/// Middleware that verifies bearer tokens and adds the subject to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.jwt_handler.verify_now(token).map_err(|e| {
        tracing::warn!(kind = e.kind(), "Token verification failed");
        unauthenticated()
    })?;

    let email = EmailAddress::new(claims.subject().to_string()).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an email address");
        unauthenticated()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { email });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            unauthenticated()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::debug!("Authorization header is not valid ASCII");
        unauthenticated()
    })?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => {
            tracing::debug!("Authorization header is not a bearer token");
            Err(unauthenticated())
        }
    }
}

fn unauthenticated() -> ApiError {
    ApiError::Unauthorized(UNAUTHENTICATED_MESSAGE.to_string())
}
