// src/handlers/clock.rs
//
// Clock in/out and breaks for the signed-in user.

use crate::{
    auth::AuthUser,
    errors::AppResult,
    models::{ClockState, ClockStatus},
    state::AppState,
};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use tracing::info;

async fn transition(
    state: &AppState,
    user_id: &str,
    action: &'static str,
    apply: impl FnOnce(&mut ClockState, DateTime<Utc>) -> AppResult<()>,
) -> AppResult<Json<ClockStatus>> {
    let now = Utc::now();
    let clock = state
        .sessions
        .update_clock(user_id, |s| apply(s, now))
        .await?;
    info!(user_id, action, "Clock updated");
    Ok(Json(clock.status(now)))
}

/// Current clock state with live session and break durations
#[utoipa::path(
    get,
    path = "/api/v1/clock",
    responses(
        (status = 200, description = "Clock status", body = ClockStatus),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clock"
)]
pub async fn clock_status(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ClockStatus>> {
    let clock = state.sessions.clock_state(&user.id).await?;
    Ok(Json(clock.status(Utc::now())))
}

#[utoipa::path(
    post,
    path = "/api/v1/clock/in",
    responses(
        (status = 200, description = "Clocked in", body = ClockStatus),
        (status = 409, description = "Already clocked in"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clock"
)]
pub async fn clock_in(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ClockStatus>> {
    transition(&state, &user.id, "clock_in", ClockState::clock_in).await
}

#[utoipa::path(
    post,
    path = "/api/v1/clock/out",
    responses(
        (status = 200, description = "Clocked out", body = ClockStatus),
        (status = 409, description = "Not clocked in"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clock"
)]
pub async fn clock_out(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ClockStatus>> {
    transition(&state, &user.id, "clock_out", ClockState::clock_out).await
}

#[utoipa::path(
    post,
    path = "/api/v1/clock/break/start",
    responses(
        (status = 200, description = "Break started", body = ClockStatus),
        (status = 409, description = "Not clocked in or already on break"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clock"
)]
pub async fn start_break(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ClockStatus>> {
    transition(&state, &user.id, "start_break", ClockState::start_break).await
}

#[utoipa::path(
    post,
    path = "/api/v1/clock/break/end",
    responses(
        (status = 200, description = "Break ended", body = ClockStatus),
        (status = 409, description = "Not on break"),
    ),
    security(("bearer_auth" = [])),
    tag = "Clock"
)]
pub async fn end_break(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ClockStatus>> {
    transition(&state, &user.id, "end_break", ClockState::end_break).await
}
