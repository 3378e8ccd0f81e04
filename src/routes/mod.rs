// src/routes/mod.rs

use crate::{
    handlers::{
        attendance::{attendance_stats, export_attendance, list_attendance, update_attendance},
        auth::{current_session, login, logout},
        clock::{clock_in, clock_out, clock_status, end_break, start_break},
        employee::{
            create_employee, delete_employee, get_employee, list_employees,
            toggle_employee_status, update_employee,
        },
        general::{dashboard, health_handler, not_found, root_handler},
        payroll::{
            calculate_all, generate_payslip, get_payslip, list_entries, list_payslips,
            payroll_summary, print_payslip, salary_breakdown, update_entry,
        },
        stock::{
            create_stock_item, get_stock_item, issue_stock, list_stock_items, list_transactions,
            low_stock, receive_stock, stock_summary,
        },
    },
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // ─── Auth ─────────────────────────────────────────────
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(current_session))
        .route("/dashboard", get(dashboard))
        // ─── Clock ────────────────────────────────────────────
        .route("/clock", get(clock_status))
        .route("/clock/in", post(clock_in))
        .route("/clock/out", post(clock_out))
        .route("/clock/break/start", post(start_break))
        .route("/clock/break/end", post(end_break))
        // ─── Employees ────────────────────────────────────────
        .route("/employees", post(create_employee).get(list_employees))
        .route(
            "/employees/{id}",
            get(get_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
        .route("/employees/{id}/toggle-status", post(toggle_employee_status))
        // ─── Attendance ───────────────────────────────────────
        .route("/attendance", get(list_attendance))
        .route("/attendance/export", get(export_attendance))
        .route("/attendance/stats", get(attendance_stats))
        .route("/attendance/{id}", patch(update_attendance))
        // ─── Stock ────────────────────────────────────────────
        .route("/stock/items", get(list_stock_items).post(create_stock_item))
        .route("/stock/items/{item_code}", get(get_stock_item))
        .route("/stock/low", get(low_stock))
        .route("/stock/summary", get(stock_summary))
        .route("/stock/transactions", get(list_transactions))
        .route("/stock/incoming", post(receive_stock))
        .route("/stock/outgoing", post(issue_stock))
        // ─── Salary ───────────────────────────────────────────
        .route("/salary/entries", get(list_entries))
        .route("/salary/entries/{employee_id}", patch(update_entry))
        .route(
            "/salary/entries/{employee_id}/breakdown",
            get(salary_breakdown),
        )
        .route("/salary/calculate", post(calculate_all))
        .route("/salary/summary", get(payroll_summary))
        .route("/salary/payslips", get(list_payslips).post(generate_payslip))
        .route("/salary/payslips/{id}", get(get_payslip))
        .route("/salary/payslips/{id}/print", get(print_payslip))
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
