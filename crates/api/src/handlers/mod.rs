//! Request handlers.
//!
//! Handlers delegate to the employee repository, the photo store, and
//! `roster_db` repositories, and map errors via [`crate::error::AppError`].

pub mod auth;
pub mod employee;
pub mod submission;
