use crate::{
    auth::AuthUser,
    errors::{AppError, AppResult},
    models::{AdminDashboard, Dashboard, EmployeeDashboard, EmployeeStatus, Role},
    services::{attendance::AttendanceService, payroll::PayrollService, stock::StockLedger},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
};
use chrono::Utc;
use serde_json::json;

const RECENT_ATTENDANCE: usize = 5;

/// Landing page with links to the docs and route groups
pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>{company}</title>
  <style>
    body {{ font-family: 'Segoe UI', system-ui, sans-serif; background: #0f172a; color: #e2e8f0; padding: 40px 20px; }}
    .container {{ max-width: 720px; margin: 0 auto; }}
    h1 {{ font-size: 2.2rem; margin-bottom: 8px; }}
    a {{ color: #38bdf8; }}
    li {{ margin: 6px 0; font-family: monospace; }}
  </style>
</head>
<body>
<div class="container">
  <h1>{company}</h1>
  <p>Employees, attendance, stock and payroll console API.</p>
  <ul>
    <li><a href="/docs">/docs</a> Swagger UI</li>
    <li><a href="/health">/health</a> service health</li>
    <li>POST /api/v1/auth/login</li>
    <li>GET /api/v1/dashboard</li>
    <li>/api/v1/clock</li>
    <li>/api/v1/employees</li>
    <li>/api/v1/attendance</li>
    <li>/api/v1/stock</li>
    <li>/api/v1/salary</li>
  </ul>
</div>
</body>
</html>"#,
        company = state.config.company_name
    ))
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.sessions.active_count().await {
        Ok(active_sessions) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "persisted_state": "available",
                "active_sessions": active_sessions,
                "service": "tyre-centre",
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "persisted_state": "unavailable",
                "error": e.to_string()
            })),
        ),
    }
}

/// Role-dispatched dashboard
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Admin KPIs or the employee's own clock and attendance", body = Dashboard),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn dashboard(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Dashboard>> {
    let now = Utc::now();
    match user.role {
        Role::Admin => {
            let data = state.data.read().await;
            let stock = StockLedger::summary(&data.stock_items);
            Ok(Json(Dashboard::Admin(AdminDashboard {
                total_employees: data.employees.len(),
                active_employees: data
                    .employees
                    .iter()
                    .filter(|e| e.status == EmployeeStatus::Active)
                    .count(),
                attendance_rate: AttendanceService::stats(&data, now.date_naive()).attendance_rate,
                stock_items: stock.item_count,
                low_stock_alerts: stock.low_stock_count,
                total_stock_value: stock.total_stock_value,
                total_payroll: PayrollService::summary(&data.payroll_entries).total_payroll,
            })))
        }
        Role::Employee => {
            let clock = state.sessions.clock_state(&user.id).await?.status(now);
            let recent_attendance = match &user.employee_id {
                Some(code) => {
                    let data = state.data.read().await;
                    AttendanceService::recent_for(&data, code, RECENT_ATTENDANCE)
                }
                None => Vec::new(),
            };
            Ok(Json(Dashboard::Employee(EmployeeDashboard {
                user,
                clock,
                recent_attendance,
            })))
        }
    }
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
