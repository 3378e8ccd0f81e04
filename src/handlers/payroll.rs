use crate::{
    auth::AdminUser,
    errors::{AppError, AppResult},
    models::{
        GeneratePayslipRequest, PayrollEntry, PayrollSummary, Payslip, SalaryBreakdown,
        UpdatePayrollEntryRequest,
    },
    services::{export::payslip_html, payroll::PayrollService},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use chrono::Utc;
use uuid::Uuid;

/// Payroll inputs and last computed pay for every employee
#[utoipa::path(
    get,
    path = "/api/v1/salary/entries",
    responses(
        (status = 200, description = "Payroll entries", body = Vec<PayrollEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn list_entries(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PayrollEntry>>> {
    let data = state.data.read().await;
    Ok(Json(data.payroll_entries.clone()))
}

/// Set hours, overtime, allowances or deductions for an employee
#[utoipa::path(
    patch,
    path = "/api/v1/salary/entries/{employee_id}",
    request_body = UpdatePayrollEntryRequest,
    params(("employee_id" = String, Path, description = "Employee code, e.g. EMP001")),
    responses(
        (status = 200, description = "Entry updated", body = PayrollEntry),
        (status = 400, description = "Negative value"),
        (status = 404, description = "Entry not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn update_entry(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(body): Json<UpdatePayrollEntryRequest>,
) -> AppResult<Json<PayrollEntry>> {
    let mut data = state.data.write().await;
    Ok(Json(PayrollService::update_entry(&mut data, &employee_id, body)?))
}

/// Salary breakdown for one employee without writing anything back
#[utoipa::path(
    get,
    path = "/api/v1/salary/entries/{employee_id}/breakdown",
    params(("employee_id" = String, Path, description = "Employee code, e.g. EMP001")),
    responses(
        (status = 200, description = "Computed pay", body = SalaryBreakdown),
        (status = 404, description = "Entry not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn salary_breakdown(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<SalaryBreakdown>> {
    let data = state.data.read().await;
    data.payroll_entries
        .iter()
        .find(|e| e.employee_id == employee_id)
        .map(|e| Json(PayrollService::calculate(e)))
        .ok_or_else(|| AppError::NotFound(format!("Payroll entry {employee_id} not found")))
}

/// Recalculate every employee's salary
#[utoipa::path(
    post,
    path = "/api/v1/salary/calculate",
    responses(
        (status = 200, description = "Recalculated entries", body = Vec<PayrollEntry>),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn calculate_all(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PayrollEntry>>> {
    let mut data = state.data.write().await;
    Ok(Json(PayrollService::calculate_all(&mut data)))
}

#[utoipa::path(
    get,
    path = "/api/v1/salary/summary",
    responses(
        (status = 200, description = "Payroll totals", body = PayrollSummary),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn payroll_summary(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<PayrollSummary>> {
    let data = state.data.read().await;
    Ok(Json(PayrollService::summary(&data.payroll_entries)))
}

/// Generate a payslip for one employee and period
#[utoipa::path(
    post,
    path = "/api/v1/salary/payslips",
    request_body = GeneratePayslipRequest,
    responses(
        (status = 201, description = "Payslip generated", body = Payslip),
        (status = 400, description = "Unknown month name"),
        (status = 404, description = "Entry not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn generate_payslip(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<GeneratePayslipRequest>,
) -> AppResult<(StatusCode, Json<Payslip>)> {
    let mut data = state.data.write().await;
    let payslip = PayrollService::generate_payslip(
        &mut data,
        &body.employee_id,
        &body.month,
        body.year,
        Utc::now().date_naive(),
    )?;
    Ok((StatusCode::CREATED, Json(payslip)))
}

/// All payslips, newest first
#[utoipa::path(
    get,
    path = "/api/v1/salary/payslips",
    responses(
        (status = 200, description = "Payslips", body = Vec<Payslip>),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn list_payslips(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Payslip>>> {
    let data = state.data.read().await;
    Ok(Json(data.payslips.clone()))
}

fn find_payslip(payslips: &[Payslip], id: Uuid) -> AppResult<&Payslip> {
    payslips
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Payslip {id} not found")))
}

#[utoipa::path(
    get,
    path = "/api/v1/salary/payslips/{id}",
    params(("id" = Uuid, Path, description = "Payslip ID")),
    responses(
        (status = 200, description = "Payslip", body = Payslip),
        (status = 404, description = "Payslip not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn get_payslip(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Payslip>> {
    let data = state.data.read().await;
    Ok(Json(find_payslip(&data.payslips, id)?.clone()))
}

/// Printable HTML rendering of a payslip
#[utoipa::path(
    get,
    path = "/api/v1/salary/payslips/{id}/print",
    params(("id" = Uuid, Path, description = "Payslip ID")),
    responses(
        (status = 200, description = "Payslip document", content_type = "text/html", body = String),
        (status = 404, description = "Payslip not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Salary"
)]
pub async fn print_payslip(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let data = state.data.read().await;
    let payslip = find_payslip(&data.payslips, id)?;
    Ok(Html(payslip_html(&state.config.company_name, payslip)))
}
