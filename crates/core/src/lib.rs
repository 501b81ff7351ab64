//! Domain types and rules for the employee directory.
//!
//! Nothing in this crate touches the database; persistence lives in
//! `roster_db` and HTTP concerns in `roster_api`.

pub mod department;
pub mod error;
pub mod form;
pub mod photo;
pub mod types;
