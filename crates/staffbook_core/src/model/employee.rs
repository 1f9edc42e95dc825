//! Employee collaborator contract.
//!
//! # Responsibility
//! - Describe the employee record shape consumed by review validation.
//! - Provide the lookup contract (`EmployeeDirectory`) plus a SQLite
//!   adapter over the application's `employees` table.
//!
//! # Invariants
//! - The directory is consulted only when `employee_id` is assigned.
//! - Absence is `None`, never an error; lookup transport failures are
//!   logged and reported as absence to the caller.

use log::error;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Employee record as exposed by the employee component.
///
/// Only the fields the review component consumes are modeled here; the
/// employee store itself is owned elsewhere in the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub job_title: String,
}

/// Lookup-by-id contract consumed for referential validation.
pub trait EmployeeDirectory {
    /// Returns the employee with the given id, or `None` when no such
    /// record exists.
    fn find_by_id(&self, id: i64) -> Option<Employee>;
}

/// In-memory directory, convenient for fixtures and tests.
impl EmployeeDirectory for HashMap<i64, Employee> {
    fn find_by_id(&self, id: i64) -> Option<Employee> {
        self.get(&id).cloned()
    }
}

/// Directory backed by the application's `employees` table.
pub struct SqliteEmployeeDirectory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeDirectory<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeDirectory for SqliteEmployeeDirectory<'_> {
    fn find_by_id(&self, id: i64) -> Option<Employee> {
        let result = self
            .conn
            .query_row(
                "SELECT id, name, job_title FROM employees WHERE id = ?1;",
                params![id],
                |row| {
                    Ok(Employee {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        job_title: row.get(2)?,
                    })
                },
            )
            .optional();

        match result {
            Ok(found) => found,
            Err(err) => {
                error!("event=employee_lookup module=model status=error id={id} error={err}");
                None
            }
        }
    }
}
