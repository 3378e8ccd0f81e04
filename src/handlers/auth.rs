// src/handlers/auth.rs

use crate::{
    auth::{AuthUser, generate_token},
    errors::{AppError, AppResult},
    models::{AuthResponse, LoginRequest, User},
    state::AppState,
};
use axum::{Json, extract::State};
use tracing::{info, warn};

/// Sign in with one of the demo accounts
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid email or password"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .identity
        .authenticate(&body.email, &body.password)
        .await?
        .ok_or_else(|| {
            warn!(email = %body.email, "Login rejected");
            AppError::Unauthorized("Invalid email or password".to_string())
        })?;

    let session_id = state.sessions.start(&user).await?;
    let token = generate_token(
        &user,
        session_id,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;
    info!(user_id = %user.id, role = ?user.role, "User signed in");

    Ok(Json(AuthResponse { token, user }))
}

/// Sign out and clear the stored session
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Signed out"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    state.sessions.end(&user.id).await?;
    info!(user_id = %user.id, "User signed out");
    Ok(Json(serde_json::json!({ "message": "Signed out" })))
}

/// The user restored from the caller's persisted session
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Stored session user", body = User),
        (status = 401, description = "No token, or the session has ended"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn current_session(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<User>> {
    state
        .sessions
        .session(&user.id)
        .await?
        .map(|s| Json(s.user))
        .ok_or_else(|| AppError::Unauthorized("Session has ended".to_string()))
}
