// src/openapi.rs

use crate::models::{
    AdminDashboard, AttendanceRecord, AttendanceStats, AttendanceStatus, AuthResponse,
    ClockPhase, ClockStatus, CreateEmployeeRequest, CreateStockItemRequest, Dashboard, Employee,
    EmployeeDashboard, EmployeeStatus, GeneratePayslipRequest, IssueStockRequest, LoginRequest,
    PayrollEntry, PayrollEntryStatus, PayrollSummary, Payslip, PayslipStatus, ReceiveStockRequest,
    Role, SalaryBreakdown, StockItem, StockItemView, StockStatus, StockSummary, StockTransaction,
    TransactionType, UpdateAttendanceRequest, UpdateEmployeeRequest, UpdatePayrollEntryRequest,
    User,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tyre Centre Console API",
        version = "1.0.0",
        description = "Back-office console for a tyre centre: employee records, \
            clock in/out, attendance reporting, tyre stock ledger and payroll with payslips.",
    ),
    paths(
        // Auth
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::auth::current_session,
        // Dashboard
        crate::handlers::general::dashboard,
        // Clock
        crate::handlers::clock::clock_status,
        crate::handlers::clock::clock_in,
        crate::handlers::clock::clock_out,
        crate::handlers::clock::start_break,
        crate::handlers::clock::end_break,
        // Employees
        crate::handlers::employee::create_employee,
        crate::handlers::employee::list_employees,
        crate::handlers::employee::get_employee,
        crate::handlers::employee::update_employee,
        crate::handlers::employee::toggle_employee_status,
        crate::handlers::employee::delete_employee,
        // Attendance
        crate::handlers::attendance::list_attendance,
        crate::handlers::attendance::update_attendance,
        crate::handlers::attendance::export_attendance,
        crate::handlers::attendance::attendance_stats,
        // Stock
        crate::handlers::stock::list_stock_items,
        crate::handlers::stock::create_stock_item,
        crate::handlers::stock::get_stock_item,
        crate::handlers::stock::low_stock,
        crate::handlers::stock::stock_summary,
        crate::handlers::stock::list_transactions,
        crate::handlers::stock::receive_stock,
        crate::handlers::stock::issue_stock,
        // Salary
        crate::handlers::payroll::list_entries,
        crate::handlers::payroll::update_entry,
        crate::handlers::payroll::salary_breakdown,
        crate::handlers::payroll::calculate_all,
        crate::handlers::payroll::payroll_summary,
        crate::handlers::payroll::generate_payslip,
        crate::handlers::payroll::list_payslips,
        crate::handlers::payroll::get_payslip,
        crate::handlers::payroll::print_payslip,
    ),
    components(
        schemas(
            LoginRequest, AuthResponse, User, Role,
            Dashboard, AdminDashboard, EmployeeDashboard,
            ClockStatus, ClockPhase,
            Employee, EmployeeStatus, CreateEmployeeRequest, UpdateEmployeeRequest,
            AttendanceRecord, AttendanceStatus, AttendanceStats, UpdateAttendanceRequest,
            StockItem, StockItemView, StockStatus, CreateStockItemRequest,
            ReceiveStockRequest, IssueStockRequest, StockTransaction, TransactionType, StockSummary,
            PayrollEntry, PayrollEntryStatus, UpdatePayrollEntryRequest, SalaryBreakdown,
            PayrollSummary, Payslip, PayslipStatus, GeneratePayslipRequest,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Sign in with a demo account and manage the stored session"),
        (name = "Dashboard", description = "Role-specific landing data"),
        (name = "Clock", description = "Clock in/out and breaks for the signed-in user"),
        (name = "Employees", description = "Employee records"),
        (name = "Attendance", description = "Attendance records, stats and CSV export"),
        (name = "Stock", description = "Tyre stock items and the transaction ledger"),
        (name = "Salary", description = "Payroll inputs, calculation and payslips"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/auth/login",
            "/api/v1/clock/break/start",
            "/api/v1/employees/{id}/toggle-status",
            "/api/v1/attendance/export",
            "/api/v1/stock/outgoing",
            "/api/v1/salary/payslips/{id}/print",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
