// src/services/payroll.rs

use crate::{
    errors::{AppError, AppResult},
    models::{
        PayrollEntry, PayrollEntryStatus, PayrollSummary, Payslip, PayslipStatus,
        SalaryBreakdown, UpdatePayrollEntryRequest,
    },
    store::ConsoleData,
};
use chrono::{Month, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use uuid::Uuid;

const OVERTIME_MULTIPLIER: Decimal = dec!(1.5);

pub struct PayrollService;

impl PayrollService {
    /// Pay for one entry. Inputs are taken as-is; negative values are rejected
    /// at the request boundary, not here.
    pub fn calculate(entry: &PayrollEntry) -> SalaryBreakdown {
        let regular_pay = entry.hours_worked * entry.hourly_rate;
        let overtime_pay = entry.overtime * entry.hourly_rate * OVERTIME_MULTIPLIER;
        let gross_salary = regular_pay + overtime_pay + entry.allowances;
        let net_salary = gross_salary - entry.deductions;

        SalaryBreakdown {
            regular_pay,
            overtime_pay,
            gross_salary,
            net_salary,
        }
    }

    /// Recompute every entry and write the results back.
    pub fn calculate_all(data: &mut ConsoleData) -> Vec<PayrollEntry> {
        for entry in data.payroll_entries.iter_mut() {
            let calculated = Self::calculate(entry);
            entry.base_salary = calculated.regular_pay;
            entry.net_salary = calculated.net_salary;
            entry.status = PayrollEntryStatus::Calculated;
        }
        info!(count = data.payroll_entries.len(), "Salaries recalculated");
        data.payroll_entries.clone()
    }

    pub fn update_entry(
        data: &mut ConsoleData,
        employee_id: &str,
        body: UpdatePayrollEntryRequest,
    ) -> AppResult<PayrollEntry> {
        for (field, value) in [
            ("hours_worked", body.hours_worked),
            ("overtime", body.overtime),
            ("allowances", body.allowances),
            ("deductions", body.deductions),
        ] {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(AppError::Validation(format!("{field} cannot be negative")));
            }
        }

        let entry = data
            .payroll_entry_mut(employee_id)
            .ok_or_else(|| AppError::NotFound(format!("Payroll entry {employee_id} not found")))?;

        if let Some(v) = body.hours_worked {
            entry.hours_worked = v;
        }
        if let Some(v) = body.overtime {
            entry.overtime = v;
        }
        if let Some(v) = body.allowances {
            entry.allowances = v;
        }
        if let Some(v) = body.deductions {
            entry.deductions = v;
        }
        entry.status = PayrollEntryStatus::Pending;

        Ok(entry.clone())
    }

    /// Snapshot an entry into a new payslip and prepend it to the list.
    pub fn generate_payslip(
        data: &mut ConsoleData,
        employee_id: &str,
        month: &str,
        year: i32,
        today: NaiveDate,
    ) -> AppResult<Payslip> {
        let month: Month = month
            .parse()
            .map_err(|_| AppError::Validation(format!("'{month}' is not a month name")))?;

        let entry = data
            .payroll_entry_mut(employee_id)
            .ok_or_else(|| AppError::NotFound(format!("Payroll entry {employee_id} not found")))?;

        let calculated = Self::calculate(entry);
        let payslip = Payslip {
            id: Uuid::new_v4(),
            employee_id: entry.employee_id.clone(),
            employee_name: entry.name.clone(),
            month: month.name().to_string(),
            year,
            base_salary: calculated.regular_pay,
            overtime_pay: calculated.overtime_pay,
            allowances: entry.allowances,
            gross_salary: calculated.gross_salary,
            deductions: entry.deductions,
            net_salary: calculated.net_salary,
            generated_date: today,
            paid_date: None,
            status: PayslipStatus::Generated,
        };
        entry.status = PayrollEntryStatus::Calculated;

        data.payslips.insert(0, payslip.clone());
        info!(
            payslip_id = %payslip.id,
            employee_id = %payslip.employee_id,
            net = %payslip.net_salary,
            "Payslip generated for {} {}",
            payslip.month,
            payslip.year
        );

        Ok(payslip)
    }

    pub fn summary(entries: &[PayrollEntry]) -> PayrollSummary {
        PayrollSummary {
            total_payroll: entries.iter().map(|e| e.net_salary).sum(),
            employee_count: entries.len(),
            calculated_count: entries
                .iter()
                .filter(|e| e.status == PayrollEntryStatus::Calculated)
                .count(),
            paid_count: entries
                .iter()
                .filter(|e| e.status == PayrollEntryStatus::Paid)
                .count(),
        }
    }
}
