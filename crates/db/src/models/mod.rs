//! Row models and DTOs, one module per table.

pub mod employee;
pub mod user;
