pub mod attendance;
pub mod employees;
pub mod export;
pub mod payroll;
pub mod session;
pub mod stock;
