//! Domain records for the review component.
//!
//! # Responsibility
//! - Define the canonical `Review` record and its field constraints.
//! - Define the `Employee` collaborator contract used for referential
//!   validation.
//!
//! # Invariants
//! - A constructed `Review` never holds an invalid field value.
//! - `employee_id` is checked against the employee directory at
//!   assignment time only, never on read.

pub mod employee;
pub mod review;
