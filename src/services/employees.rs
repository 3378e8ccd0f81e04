// src/services/employees.rs

use crate::{
    errors::{AppError, AppResult},
    models::{
        CreateEmployeeRequest, Employee, EmployeeQuery, EmployeeStatus, PayrollEntry,
        PayrollEntryStatus, UpdateEmployeeRequest,
    },
    store::ConsoleData,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

pub struct EmployeeService;

impl EmployeeService {
    pub fn filter<'a>(employees: &'a [Employee], query: &EmployeeQuery) -> Vec<&'a Employee> {
        let term = query.search.as_deref().unwrap_or_default().to_lowercase();
        employees
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&term)
                    || e.employee_id.to_lowercase().contains(&term)
                    || e.email.to_lowercase().contains(&term)
            })
            .filter(|e| query.status.is_none_or(|s| e.status == s))
            .collect()
    }

    pub fn create(
        data: &mut ConsoleData,
        body: CreateEmployeeRequest,
        today: NaiveDate,
    ) -> AppResult<Employee> {
        if body.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if body.hourly_rate < Decimal::ZERO {
            return Err(AppError::Validation("Hourly rate cannot be negative".to_string()));
        }
        if data.employees.iter().any(|e| e.email.eq_ignore_ascii_case(&body.email)) {
            return Err(AppError::Conflict(format!(
                "Employee with email '{}' already exists",
                body.email
            )));
        }

        data.employee_seq += 1;
        let employee = Employee {
            id: Uuid::new_v4(),
            employee_id: format!("EMP{:03}", data.employee_seq),
            name: body.name,
            email: body.email,
            phone: body.phone,
            address: body.address,
            position: body.position,
            department: body.department,
            hourly_rate: body.hourly_rate,
            status: body.status.unwrap_or(EmployeeStatus::Active),
            join_date: today,
        };
        data.employees.push(employee.clone());
        data.payroll_entries.push(PayrollEntry {
            employee_id: employee.employee_id.clone(),
            name: employee.name.clone(),
            position: employee.position.clone(),
            hourly_rate: employee.hourly_rate,
            hours_worked: Decimal::ZERO,
            overtime: Decimal::ZERO,
            allowances: Decimal::ZERO,
            deductions: Decimal::ZERO,
            base_salary: Decimal::ZERO,
            net_salary: Decimal::ZERO,
            status: PayrollEntryStatus::Pending,
        });
        info!(employee_id = %employee.employee_id, "Employee added");

        Ok(employee)
    }

    pub fn get(data: &ConsoleData, id: Uuid) -> AppResult<Employee> {
        data.employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
    }

    fn find_mut(data: &mut ConsoleData, id: Uuid) -> AppResult<&mut Employee> {
        data.employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
    }

    pub fn update(
        data: &mut ConsoleData,
        id: Uuid,
        body: UpdateEmployeeRequest,
    ) -> AppResult<Employee> {
        if body.hourly_rate.is_some_and(|r| r < Decimal::ZERO) {
            return Err(AppError::Validation("Hourly rate cannot be negative".to_string()));
        }
        if let Some(email) = &body.email {
            if data
                .employees
                .iter()
                .any(|e| e.id != id && e.email.eq_ignore_ascii_case(email))
            {
                return Err(AppError::Conflict(format!(
                    "Employee with email '{email}' already exists"
                )));
            }
        }

        let employee = Self::find_mut(data, id)?;
        if let Some(v) = body.name {
            employee.name = v;
        }
        if let Some(v) = body.email {
            employee.email = v;
        }
        if let Some(v) = body.phone {
            employee.phone = v;
        }
        if let Some(v) = body.address {
            employee.address = v;
        }
        if let Some(v) = body.position {
            employee.position = v;
        }
        if let Some(v) = body.department {
            employee.department = v;
        }
        if let Some(v) = body.hourly_rate {
            employee.hourly_rate = v;
        }
        if let Some(v) = body.status {
            employee.status = v;
        }
        let employee = employee.clone();

        if let Some(entry) = data.payroll_entry_mut(&employee.employee_id) {
            entry.name = employee.name.clone();
            entry.position = employee.position.clone();
            entry.hourly_rate = employee.hourly_rate;
        }

        Ok(employee)
    }

    pub fn toggle_status(data: &mut ConsoleData, id: Uuid) -> AppResult<Employee> {
        let employee = Self::find_mut(data, id)?;
        employee.status = employee.status.toggled();
        Ok(employee.clone())
    }

    pub fn delete(data: &mut ConsoleData, id: Uuid) -> AppResult<Employee> {
        let index = data
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;
        let removed = data.employees.remove(index);
        data.payroll_entries
            .retain(|entry| entry.employee_id != removed.employee_id);
        info!(employee_id = %removed.employee_id, "Employee deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial::demo_data;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
    }

    fn new_hire(email: &str) -> CreateEmployeeRequest {
        CreateEmployeeRequest {
            name: "Priya Patel".to_string(),
            email: email.to_string(),
            phone: "+1234567899".to_string(),
            address: "1 Elm St".to_string(),
            position: "Tyre Technician".to_string(),
            department: "Operations".to_string(),
            hourly_rate: dec!(24),
            status: None,
        }
    }

    #[test]
    fn create_assigns_next_code_and_join_date() {
        let mut data = demo_data();
        let e = EmployeeService::create(&mut data, new_hire("priya@tyrecentre.com"), today()).unwrap();
        assert_eq!(e.employee_id, "EMP004");
        assert_eq!(e.join_date, today());
        assert_eq!(e.status, EmployeeStatus::Active);
        assert!(data.payroll_entries.iter().any(|p| p.employee_id == "EMP004"));
    }

    #[test]
    fn codes_stay_unique_after_delete() {
        let mut data = demo_data();
        let first = data.employees[0].id;
        EmployeeService::delete(&mut data, first).unwrap();

        let e = EmployeeService::create(&mut data, new_hire("priya@tyrecentre.com"), today()).unwrap();
        assert_eq!(e.employee_id, "EMP004");
        let codes: Vec<&str> = data.employees.iter().map(|e| e.employee_id.as_str()).collect();
        assert_eq!(codes, ["EMP002", "EMP003", "EMP004"]);
    }

    #[test]
    fn duplicate_email_conflicts() {
        let mut data = demo_data();
        let err = EmployeeService::create(&mut data, new_hire("John.Doe@tyrecentre.com"), today()).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn filter_by_search_and_status() {
        let data = demo_data();
        let q = EmployeeQuery { search: Some("sarah".into()), status: None };
        assert_eq!(EmployeeService::filter(&data.employees, &q).len(), 1);

        let q = EmployeeQuery { search: None, status: Some(EmployeeStatus::Inactive) };
        let found = EmployeeService::filter(&data.employees, &q);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].employee_id, "EMP003");

        let q = EmployeeQuery { search: Some("@tyrecentre".into()), status: Some(EmployeeStatus::Active) };
        assert_eq!(EmployeeService::filter(&data.employees, &q).len(), 2);
    }

    #[test]
    fn toggle_flips_status() {
        let mut data = demo_data();
        let id = data.employees[2].id;
        assert_eq!(EmployeeService::toggle_status(&mut data, id).unwrap().status, EmployeeStatus::Active);
        assert_eq!(EmployeeService::toggle_status(&mut data, id).unwrap().status, EmployeeStatus::Inactive);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut data = demo_data();
        let id = data.employees[0].id;
        let body = UpdateEmployeeRequest {
            position: Some("Senior Technician".into()),
            hourly_rate: Some(dec!(27.5)),
            ..Default::default()
        };
        let e = EmployeeService::update(&mut data, id, body).unwrap();
        assert_eq!(e.position, "Senior Technician");
        assert_eq!(e.hourly_rate, dec!(27.5));
        assert_eq!(e.name, "John Doe");
        let entry = data.payroll_entries.iter().find(|p| p.employee_id == "EMP001").unwrap();
        assert_eq!(entry.hourly_rate, dec!(27.5));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut data = demo_data();
        assert!(matches!(EmployeeService::delete(&mut data, Uuid::new_v4()), Err(AppError::NotFound(_))));
    }
}
