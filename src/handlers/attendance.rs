use crate::{
    auth::AdminUser,
    errors::AppResult,
    models::{AttendanceQuery, AttendanceRecord, AttendanceStats, StatsQuery, UpdateAttendanceRequest},
    services::attendance::AttendanceService,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

/// List attendance records filtered by search term, date and status
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records", body = Vec<AttendanceRecord>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    let data = state.data.read().await;
    let records = AttendanceService::filter(&data.attendance, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(records))
}

/// Edit an attendance record
#[utoipa::path(
    patch,
    path = "/api/v1/attendance/{id}",
    request_body = UpdateAttendanceRequest,
    params(("id" = Uuid, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Record updated", body = AttendanceRecord),
        (status = 400, description = "Invalid clock time"),
        (status = 404, description = "Record not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn update_attendance(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAttendanceRequest>,
) -> AppResult<Json<AttendanceRecord>> {
    let mut data = state.data.write().await;
    Ok(Json(AttendanceService::update(&mut data, id, body)?))
}

/// Export the filtered records as CSV
#[utoipa::path(
    get,
    path = "/api/v1/attendance/export",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn export_attendance(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<impl IntoResponse> {
    let data = state.data.read().await;
    let csv = AttendanceService::to_csv(&AttendanceService::filter(&data.attendance, &query));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"attendance_records.csv\"",
            ),
        ],
        csv,
    ))
}

/// Present/late/absent counts and attendance rate for one day
#[utoipa::path(
    get,
    path = "/api/v1/attendance/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Daily statistics", body = AttendanceStats),
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn attendance_stats(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<AttendanceStats>> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let data = state.data.read().await;
    Ok(Json(AttendanceService::stats(&data, date)))
}
