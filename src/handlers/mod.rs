pub mod attendance;
pub mod auth;
pub mod clock;
pub mod employee;
pub mod general;
pub mod payroll;
pub mod stock;
