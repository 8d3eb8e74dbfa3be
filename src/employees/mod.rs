//! # Employees
//!
//! Types and statements for the single `employee` table.

mod model;
mod repository;

pub use model::{Employee, EmployeeChanges, NewEmployee};
pub use repository::EmployeeRepository;
