use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthSessionData;
use super::INVALID_LOGIN_MESSAGE;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AuthSessionData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(UserError::from(e).to_string()))?;
    let command = LoginCommand::new(email, body.password)
        .map_err(|e| ApiError::UnprocessableEntity(UserError::from(e).to_string()))?;

    // Unknown email and wrong password must be indistinguishable to the caller.
    let session = state.user_service.login(command).await.map_err(|e| match e {
        UserError::NotFound(_) | UserError::InvalidCredentials => {
            ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string())
        }
        _ => ApiError::from(e),
    })?;

    Ok(ApiSuccess::new(StatusCode::OK, (&session).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
