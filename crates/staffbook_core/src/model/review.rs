//! Review domain record.
//!
//! # Responsibility
//! - Define the canonical performance-review record.
//! - Enforce field constraints through fallible setters shared by the
//!   constructor and every later mutation.
//!
//! # Invariants
//! - `id` is `None` until the repository persists the record, and is
//!   assigned only by the repository.
//! - A rejected setter leaves the prior valid value untouched.
//! - `year >= 2000`, `summary` is non-empty, and `employee_id` resolved
//!   through the directory at the moment it was assigned.

use crate::model::employee::EmployeeDirectory;
use serde::Serialize;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Earliest review year the application accepts.
pub const MIN_REVIEW_YEAR: i32 = 2000;

/// Canonical shared handle to a review.
///
/// The identity map hands out clones of one `Rc` per persisted row, so
/// reference identity (`Rc::ptr_eq`) is the "same object" guarantee.
/// Deliberately `!Send`: the review component is single-threaded.
pub type SharedReview = Rc<RefCell<Review>>;

/// Constraint violation raised by a review setter or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    YearBeforeMinimum { year: i32 },
    EmptySummary,
    UnknownEmployee(i64),
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearBeforeMinimum { year } => {
                write!(f, "year {year} is before the minimum supported year {MIN_REVIEW_YEAR}")
            }
            Self::EmptySummary => write!(f, "summary must be a non-empty string"),
            Self::UnknownEmployee(id) => {
                write!(f, "employee_id {id} does not reference an existing employee")
            }
        }
    }
}

impl Error for ReviewValidationError {}

/// Performance review for one employee in one year.
///
/// Business fields are private; they change only through the validating
/// setters, so a live `Review` never carries an invalid value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<i64>,
    year: i32,
    summary: String,
    employee_id: i64,
}

impl Review {
    /// Builds a transient review, validating all three business fields.
    ///
    /// # Errors
    /// - `YearBeforeMinimum` when `year < 2000`.
    /// - `EmptySummary` when `summary` is empty.
    /// - `UnknownEmployee` when the directory cannot resolve
    ///   `employee_id`.
    pub fn new(
        year: i32,
        summary: impl Into<String>,
        employee_id: i64,
        directory: &dyn EmployeeDirectory,
    ) -> Result<Self, ReviewValidationError> {
        let summary = summary.into();
        check_year(year)?;
        check_summary(&summary)?;
        check_employee(employee_id, directory)?;
        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    /// Wraps the review in the shared handle used by the identity map.
    pub fn into_shared(self) -> SharedReview {
        Rc::new(RefCell::new(self))
    }

    /// Store-generated primary key; `None` while transient or detached.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> i64 {
        self.employee_id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Sets the review year.
    ///
    /// # Errors
    /// - `YearBeforeMinimum` when `year < 2000`; the prior value is kept.
    pub fn set_year(&mut self, year: i32) -> Result<(), ReviewValidationError> {
        check_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Sets the review summary.
    ///
    /// # Errors
    /// - `EmptySummary` when the new summary is empty; the prior value
    ///   is kept.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        let summary = summary.into();
        check_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    /// Sets the reviewed employee.
    ///
    /// The directory is consulted now and never again; a later deletion
    /// of the employee does not cascade to this review.
    ///
    /// # Errors
    /// - `UnknownEmployee` when the directory cannot resolve
    ///   `employee_id`; the prior value is kept.
    pub fn set_employee_id(
        &mut self,
        employee_id: i64,
        directory: &dyn EmployeeDirectory,
    ) -> Result<(), ReviewValidationError> {
        check_employee(employee_id, directory)?;
        self.employee_id = employee_id;
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "<Review {id}: {}, {}, Employee: {}>",
                self.year, self.summary, self.employee_id
            ),
            None => write!(
                f,
                "<Review unsaved: {}, {}, Employee: {}>",
                self.year, self.summary, self.employee_id
            ),
        }
    }
}

fn check_year(year: i32) -> Result<(), ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearBeforeMinimum { year });
    }
    Ok(())
}

fn check_summary(summary: &str) -> Result<(), ReviewValidationError> {
    if summary.is_empty() {
        return Err(ReviewValidationError::EmptySummary);
    }
    Ok(())
}

fn check_employee(
    employee_id: i64,
    directory: &dyn EmployeeDirectory,
) -> Result<(), ReviewValidationError> {
    if directory.find_by_id(employee_id).is_none() {
        return Err(ReviewValidationError::UnknownEmployee(employee_id));
    }
    Ok(())
}
