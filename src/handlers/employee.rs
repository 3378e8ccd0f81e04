use crate::{
    auth::AdminUser,
    errors::AppResult,
    models::{CreateEmployeeRequest, Employee, EmployeeQuery, UpdateEmployeeRequest},
    services::employees::EmployeeService,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

/// Add a new employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid employee details"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Employee email already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn create_employee(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let mut data = state.data.write().await;
    let employee = EmployeeService::create(&mut data, body, Utc::now().date_naive())?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// List employees, optionally filtered by search term and status
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "List of employees", body = Vec<Employee>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn list_employees(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let data = state.data.read().await;
    let employees = EmployeeService::filter(&data.employees, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(employees))
}

/// Get a single employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee record ID")),
    responses(
        (status = 200, description = "Employee detail", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn get_employee(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    let data = state.data.read().await;
    Ok(Json(EmployeeService::get(&data, id)?))
}

/// Edit an employee's details
#[utoipa::path(
    patch,
    path = "/api/v1/employees/{id}",
    request_body = UpdateEmployeeRequest,
    params(("id" = Uuid, Path, description = "Employee record ID")),
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee email already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn update_employee(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> AppResult<Json<Employee>> {
    let mut data = state.data.write().await;
    Ok(Json(EmployeeService::update(&mut data, id, body)?))
}

/// Flip an employee between active and inactive
#[utoipa::path(
    post,
    path = "/api/v1/employees/{id}/toggle-status",
    params(("id" = Uuid, Path, description = "Employee record ID")),
    responses(
        (status = 200, description = "Status toggled", body = Employee),
        (status = 404, description = "Employee not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn toggle_employee_status(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Employee>> {
    let mut data = state.data.write().await;
    Ok(Json(EmployeeService::toggle_status(&mut data, id)?))
}

/// Permanently remove an employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee record ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Employees"
)]
pub async fn delete_employee(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let mut data = state.data.write().await;
    let removed = EmployeeService::delete(&mut data, id)?;
    Ok(Json(serde_json::json!({
        "message": format!("Employee {} deleted", removed.employee_id)
    })))
}
