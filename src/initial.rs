// src/initial.rs
//
// Demo data set the console starts with when SEED_DEMO_DATA is enabled.

use crate::{
    models::{
        AttendanceRecord, AttendanceStatus, Employee, EmployeeStatus, PayrollEntry,
        PayrollEntryStatus, Payslip, PayslipStatus, StockItem, StockTransaction, TransactionType,
    },
    store::ConsoleData,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn demo_data() -> ConsoleData {
    let mut data = ConsoleData::new();
    data.employees = employees();
    data.employee_seq = data.employees.len() as u32;
    data.attendance = attendance();
    data.stock_items = stock_items();
    data.transactions = transactions();
    data.payroll_entries = payroll_entries();
    data.payslips = payslips();
    data
}

#[allow(clippy::too_many_arguments)]
fn employee(
    code: &str,
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
    position: &str,
    department: &str,
    hourly_rate: Decimal,
    status: EmployeeStatus,
    join_date: NaiveDate,
) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        employee_id: code.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        position: position.to_string(),
        department: department.to_string(),
        hourly_rate,
        status,
        join_date,
    }
}

fn employees() -> Vec<Employee> {
    vec![
        employee(
            "EMP001",
            "John Doe",
            "john.doe@tyrecentre.com",
            "+1234567890",
            "123 Main St, City, State",
            "Tyre Technician",
            "Operations",
            dec!(25),
            EmployeeStatus::Active,
            date(2023, 1, 15),
        ),
        employee(
            "EMP002",
            "Sarah Johnson",
            "sarah.johnson@tyrecentre.com",
            "+1234567891",
            "456 Oak Ave, City, State",
            "Service Advisor",
            "Customer Service",
            dec!(22),
            EmployeeStatus::Active,
            date(2023, 3, 20),
        ),
        employee(
            "EMP003",
            "Mike Wilson",
            "mike.wilson@tyrecentre.com",
            "+1234567892",
            "789 Pine Rd, City, State",
            "Inventory Manager",
            "Warehouse",
            dec!(28),
            EmployeeStatus::Inactive,
            date(2022, 11, 10),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn record(
    code: &str,
    name: &str,
    day: NaiveDate,
    clock_in: &str,
    clock_out: &str,
    total_hours: Decimal,
    break_time: Decimal,
    overtime: Decimal,
    status: AttendanceStatus,
) -> AttendanceRecord {
    AttendanceRecord {
        id: Uuid::new_v4(),
        employee_id: code.to_string(),
        employee_name: name.to_string(),
        date: day,
        clock_in: clock_in.to_string(),
        clock_out: clock_out.to_string(),
        total_hours,
        break_time,
        overtime,
        status,
    }
}

fn attendance() -> Vec<AttendanceRecord> {
    let oct24 = date(2024, 10, 24);
    vec![
        record("EMP001", "John Doe", oct24, "09:00", "17:30", dec!(8.5), dec!(1), dec!(0.5), AttendanceStatus::Present),
        record("EMP002", "Sarah Johnson", oct24, "09:15", "17:45", dec!(8.5), dec!(1), dec!(0.5), AttendanceStatus::Late),
        record("EMP003", "Mike Wilson", oct24, "-", "-", dec!(0), dec!(0), dec!(0), AttendanceStatus::Absent),
        record("EMP001", "John Doe", date(2024, 10, 23), "09:00", "17:00", dec!(8), dec!(1), dec!(0), AttendanceStatus::Present),
    ]
}

fn stock_items() -> Vec<StockItem> {
    let item = |code: &str,
                name: &str,
                brand: &str,
                size: &str,
                (current, min, max): (u32, u32, u32),
                price: Decimal,
                supplier: &str,
                updated: NaiveDate| StockItem {
        id: Uuid::new_v4(),
        item_code: code.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        size: size.to_string(),
        current_stock: current,
        min_stock: min,
        max_stock: max,
        unit_price: price,
        supplier: supplier.to_string(),
        last_updated: updated,
    };

    vec![
        item("TYR001", "Michelin Primacy 4", "Michelin", "205/55R16", (15, 10, 50), dec!(120), "Michelin Distributor", date(2024, 10, 24)),
        item("TYR002", "Bridgestone Turanza T005", "Bridgestone", "225/45R17", (8, 15, 40), dec!(135), "Bridgestone Direct", date(2024, 10, 23)),
        item("TYR003", "Continental PremiumContact 6", "Continental", "195/65R15", (25, 12, 45), dec!(110), "Continental Supply Co", date(2024, 10, 24)),
    ]
}

fn transactions() -> Vec<StockTransaction> {
    vec![
        StockTransaction {
            id: Uuid::new_v4(),
            item_code: "TYR001".to_string(),
            item_name: "Michelin Primacy 4".to_string(),
            transaction_type: TransactionType::Incoming,
            quantity: 20,
            unit_price: dec!(120),
            total_value: dec!(2400),
            supplier: Some("Michelin Distributor".to_string()),
            customer: None,
            reason: "Regular stock replenishment".to_string(),
            date: date(2024, 10, 24),
            processed_by: "Admin User".to_string(),
        },
        StockTransaction {
            id: Uuid::new_v4(),
            item_code: "TYR002".to_string(),
            item_name: "Bridgestone Turanza T005".to_string(),
            transaction_type: TransactionType::Outgoing,
            quantity: 4,
            unit_price: dec!(135),
            total_value: dec!(540),
            supplier: None,
            customer: Some("John Smith".to_string()),
            reason: "Customer purchase".to_string(),
            date: date(2024, 10, 24),
            processed_by: "Sarah Johnson".to_string(),
        },
    ]
}

fn payroll_entries() -> Vec<PayrollEntry> {
    let entry = |code: &str,
                 name: &str,
                 position: &str,
                 rate: Decimal,
                 overtime: Decimal,
                 allowances: Decimal,
                 deductions: Decimal,
                 (base, net): (Decimal, Decimal),
                 status: PayrollEntryStatus| PayrollEntry {
        employee_id: code.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        hourly_rate: rate,
        hours_worked: dec!(160),
        overtime,
        allowances,
        deductions,
        base_salary: base,
        net_salary: net,
        status,
    };

    vec![
        entry("EMP001", "John Doe", "Tyre Technician", dec!(25), dec!(8), dec!(200), dec!(400), (dec!(4000), dec!(4000)), PayrollEntryStatus::Calculated),
        entry("EMP002", "Sarah Johnson", "Service Advisor", dec!(22), dec!(4), dec!(150), dec!(350), (dec!(3520), dec!(3408)), PayrollEntryStatus::Pending),
        entry("EMP003", "Mike Wilson", "Inventory Manager", dec!(28), dec!(12), dec!(300), dec!(450), (dec!(4480), dec!(4834)), PayrollEntryStatus::Paid),
    ]
}

fn payslips() -> Vec<Payslip> {
    vec![
        Payslip {
            id: Uuid::new_v4(),
            employee_id: "EMP001".to_string(),
            employee_name: "John Doe".to_string(),
            month: "October".to_string(),
            year: 2024,
            base_salary: dec!(4000),
            overtime_pay: dec!(300),
            allowances: dec!(200),
            gross_salary: dec!(4500),
            deductions: dec!(500),
            net_salary: dec!(4000),
            generated_date: date(2024, 10, 24),
            paid_date: Some(date(2024, 10, 25)),
            status: PayslipStatus::Paid,
        },
        Payslip {
            id: Uuid::new_v4(),
            employee_id: "EMP002".to_string(),
            employee_name: "Sarah Johnson".to_string(),
            month: "October".to_string(),
            year: 2024,
            base_salary: dec!(3520),
            overtime_pay: dec!(132),
            allowances: dec!(150),
            gross_salary: dec!(3802),
            deductions: dec!(380),
            net_salary: dec!(3422),
            generated_date: date(2024, 10, 24),
            paid_date: None,
            status: PayslipStatus::Generated,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_data_sequence_matches_seeded_employees() {
        let data = demo_data();
        assert_eq!(data.employees.len(), 3);
        assert_eq!(data.employee_seq, 3);
        assert!(data.stock_item("TYR002").is_some());
        assert_eq!(data.payroll_entries.len(), 3);
    }
}
