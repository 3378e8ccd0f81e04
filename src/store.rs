use crate::models::{
    AttendanceRecord, Employee, PayrollEntry, Payslip, StockItem, StockTransaction,
};

/// In-memory entity stores for one console instance.
#[derive(Debug, Default)]
pub struct ConsoleData {
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub stock_items: Vec<StockItem>,
    /// Newest first.
    pub transactions: Vec<StockTransaction>,
    pub payroll_entries: Vec<PayrollEntry>,
    /// Newest first.
    pub payslips: Vec<Payslip>,
    /// Last sequence number handed out for an `EMP###` code. Never decremented.
    pub employee_seq: u32,
}

impl ConsoleData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stock_item(&self, item_code: &str) -> Option<&StockItem> {
        self.stock_items.iter().find(|i| i.item_code == item_code)
    }

    pub fn stock_item_mut(&mut self, item_code: &str) -> Option<&mut StockItem> {
        self.stock_items.iter_mut().find(|i| i.item_code == item_code)
    }

    pub fn payroll_entry_mut(&mut self, employee_id: &str) -> Option<&mut PayrollEntry> {
        self.payroll_entries
            .iter_mut()
            .find(|e| e.employee_id == employee_id)
    }
}
