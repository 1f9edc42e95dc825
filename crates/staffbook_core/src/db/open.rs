//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//!
//! # Invariants
//! - Referential checks are application-level; SQLite foreign-key
//!   enforcement stays off so deleting an employee neither cascades to
//!   nor is blocked by existing reviews.
//! - Returned connections are ready for single-threaded, autocommit use.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file.
///
/// # Side effects
/// - Performs connection bootstrap.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref().to_path_buf();
    open_with(move || Connection::open(path), "file")
}

/// Opens an in-memory SQLite database.
///
/// # Side effects
/// - Performs connection bootstrap.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(Connection::open_in_memory, "memory")
}

fn open_with(
    open: impl FnOnce() -> rusqlite::Result<Connection>,
    mode: &str,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    // The bundled SQLite is compiled with SQLITE_DEFAULT_FOREIGN_KEYS=1,
    // so the application-level-validation invariant above needs the
    // pragma set explicitly.
    conn.pragma_update(None, "foreign_keys", false)?;
    Ok(())
}
