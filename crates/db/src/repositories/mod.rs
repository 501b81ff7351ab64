//! Repository layer.
//!
//! Employees are accessed through the [`EmployeeRepository`] trait so request
//! handlers can run against PostgreSQL or an in-memory map. Users keep the
//! zero-sized-struct style: async methods taking `&PgPool` first.

pub mod employee_repo;
pub mod memory;
pub mod user_repo;

pub use employee_repo::{EmployeeRepository, PgEmployeeRepo};
pub use memory::InMemoryEmployeeRepo;
pub use user_repo::UserRepo;
