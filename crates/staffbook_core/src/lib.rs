//! Core domain logic for StaffBook.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeDirectory, SqliteEmployeeDirectory};
pub use model::review::{Review, ReviewValidationError, SharedReview, MIN_REVIEW_YEAR};
pub use repo::review_repo::{RepoError, RepoResult, ReviewRepository, ReviewRow};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
