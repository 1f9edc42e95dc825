//! SQLite storage bootstrap entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for StaffBook core.
//! - Define the storage-transport error shared by all persistence code.
//!
//! # Invariants
//! - The connection is opened once by the process-lifecycle owner and
//!   shared for the process lifetime.
//! - Statements autocommit; no transaction spans multiple entities.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-transport failure from the underlying SQLite connection.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
