// src/models/mod.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// ─── Users & Session ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

/// A console user. Stored verbatim in the session key, hence camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ─── Employee ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn toggled(self) -> Self {
        match self {
            EmployeeStatus::Active => EmployeeStatus::Inactive,
            EmployeeStatus::Inactive => EmployeeStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    /// Human-facing code, e.g. "EMP001"
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub position: String,
    pub department: String,
    pub hourly_rate: Decimal,
    pub status: EmployeeStatus,
    pub join_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub position: String,
    pub department: String,
    pub hourly_rate: Decimal,
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EmployeeQuery {
    /// Matches name, employee id or email (case-insensitive)
    pub search: Option<String>,
    /// Omit to list every status
    pub status: Option<EmployeeStatus>,
}

// ─── Attendance ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::HalfDay => "half-day",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    /// "HH:MM", or "-" when absent
    pub clock_in: String,
    pub clock_out: String,
    pub total_hours: Decimal,
    pub break_time: Decimal,
    pub overtime: Decimal,
    pub status: AttendanceStatus,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAttendanceRequest {
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    pub total_hours: Option<Decimal>,
    pub break_time: Option<Decimal>,
    pub overtime: Option<Decimal>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Matches employee name or employee id (case-insensitive)
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceStats {
    pub date: NaiveDate,
    pub headcount: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    /// Percentage of the headcount not marked absent, rounded
    pub attendance_rate: u32,
}

// ─── Clock (per-user session tracker) ─────────────────────────────────────────

/// Persisted under `attendance_<userId>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClockState {
    pub clocked_in: bool,
    pub on_break: bool,
    pub clock_in_time: Option<DateTime<Utc>>,
    pub break_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_worked_hours: Decimal,
    #[serde(default)]
    pub total_break_time: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    ClockedOut,
    ClockedIn,
    OnBreak,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClockStatus {
    pub phase: ClockPhase,
    pub clock_in_time: Option<DateTime<Utc>>,
    pub break_start_time: Option<DateTime<Utc>>,
    /// e.g. "2h 15m"
    pub current_session: String,
    pub current_break: String,
    pub total_worked: String,
    pub total_break: String,
    pub total_worked_hours: Decimal,
    pub total_break_time: Decimal,
}

// ─── Stock ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockItem {
    pub id: Uuid,
    pub item_code: String,
    pub name: String,
    pub brand: String,
    pub size: String,
    pub current_stock: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit_price: Decimal,
    pub supplier: String,
    pub last_updated: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Low,
    Normal,
    High,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockItemView {
    pub item: StockItem,
    pub status: StockStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStockItemRequest {
    pub item_code: String,
    pub name: String,
    pub brand: String,
    pub size: String,
    #[serde(default)]
    pub current_stock: u32,
    pub min_stock: u32,
    pub max_stock: u32,
    pub unit_price: Decimal,
    pub supplier: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReceiveStockRequest {
    pub item_code: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub supplier: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueStockRequest {
    pub item_code: String,
    pub quantity: u32,
    pub customer: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StockQuery {
    /// Matches name, item code or brand (case-insensitive)
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockTransaction {
    pub id: Uuid,
    pub item_code: String,
    pub item_name: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    pub reason: String,
    pub date: NaiveDate,
    pub processed_by: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StockSummary {
    pub item_count: usize,
    pub low_stock_count: usize,
    pub total_stock_value: Decimal,
}

// ─── Payroll ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayrollEntryStatus {
    Calculated,
    Pending,
    Paid,
}

/// The per-employee payroll inputs for the current period.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayrollEntry {
    pub employee_id: String,
    pub name: String,
    pub position: String,
    pub hourly_rate: Decimal,
    pub hours_worked: Decimal,
    pub overtime: Decimal,
    pub allowances: Decimal,
    pub deductions: Decimal,
    pub base_salary: Decimal,
    pub net_salary: Decimal,
    pub status: PayrollEntryStatus,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePayrollEntryRequest {
    pub hours_worked: Option<Decimal>,
    pub overtime: Option<Decimal>,
    pub allowances: Option<Decimal>,
    pub deductions: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq)]
pub struct SalaryBreakdown {
    pub regular_pay: Decimal,
    pub overtime_pay: Decimal,
    pub gross_salary: Decimal,
    pub net_salary: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayslipStatus {
    Generated,
    Sent,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payslip {
    pub id: Uuid,
    pub employee_id: String,
    pub employee_name: String,
    /// Full month name, e.g. "October"
    pub month: String,
    pub year: i32,
    pub base_salary: Decimal,
    pub overtime_pay: Decimal,
    pub allowances: Decimal,
    pub gross_salary: Decimal,
    pub deductions: Decimal,
    pub net_salary: Decimal,
    pub generated_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: PayslipStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GeneratePayslipRequest {
    pub employee_id: String,
    pub month: String,
    pub year: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollSummary {
    pub total_payroll: Decimal,
    pub employee_count: usize,
    pub calculated_count: usize,
    pub paid_count: usize,
}

// ─── Dashboards ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboard {
    pub total_employees: usize,
    pub active_employees: usize,
    pub attendance_rate: u32,
    pub stock_items: usize,
    pub low_stock_alerts: usize,
    pub total_stock_value: Decimal,
    pub total_payroll: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeDashboard {
    pub user: User,
    pub clock: ClockStatus,
    pub recent_attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Admin(AdminDashboard),
    Employee(EmployeeDashboard),
}

// ─── JWT Claims ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub employee_id: Option<String>,
    /// Session id; the token stops working once that session ends.
    pub jti: Uuid,
    pub exp: usize,
    pub iat: usize,
}
