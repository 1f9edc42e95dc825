//! Review repository over the `reviews` table.
//!
//! # Responsibility
//! - Schema setup/teardown and CRUD as fixed parameterized statements.
//! - Write-through identity-map caching keyed by the store-generated
//!   primary key.
//!
//! # Invariants
//! - At most one live `SharedReview` exists per persisted row id;
//!   repeated loads refresh that object in place.
//! - Every statement autocommits and any failure propagates unwrapped
//!   to the caller.
//! - The identity map lives and dies with the repository and is cleared
//!   by `drop_table`; nothing is ever evicted otherwise.

use crate::db::DbError;
use crate::model::employee::EmployeeDirectory;
use crate::model::review::{Review, ReviewValidationError, SharedReview};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const REVIEW_SELECT_SQL: &str = "SELECT id, year, summary, employee_id FROM reviews";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for review persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewValidationError),
    Db(DbError),
    /// No row exists for the given id.
    NotFound(i64),
    /// The operation requires a persisted id but the review has none.
    Detached,
    /// The review's id is absent from the identity map. Reaching this
    /// state means the handle was persisted outside this repository or
    /// the map was reset; it is a hard failure, not a silent no-op.
    NotCached(i64),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "review not found: {id}"),
            Self::Detached => write!(f, "review has no persisted id"),
            Self::NotCached(id) => write!(f, "review {id} is not present in the identity map"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Detached | Self::NotCached(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw `reviews` row as read from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: i64,
    pub year: i32,
    pub summary: String,
    pub employee_id: i64,
}

/// SQLite-backed review repository with identity-map caching.
///
/// Holds the externally owned connection, the employee directory used
/// for referential validation, and the identity map. Single-threaded by
/// design; a multi-threaded adaptation would need one connection per
/// worker or a lock spanning both the map and statement execution.
pub struct ReviewRepository<'conn, D: EmployeeDirectory> {
    conn: &'conn Connection,
    directory: D,
    cache: HashMap<i64, SharedReview>,
}

impl<'conn, D: EmployeeDirectory> ReviewRepository<'conn, D> {
    pub fn new(conn: &'conn Connection, directory: D) -> Self {
        Self {
            conn,
            directory,
            cache: HashMap::new(),
        }
    }

    /// Creates the `reviews` table if it does not already exist.
    ///
    /// The `employee_id` reference is declared without cascade and is
    /// validated at the application level, not by SQLite.
    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                year INT,
                summary TEXT,
                employee_id INTEGER,
                FOREIGN KEY (employee_id) REFERENCES employees(id)
            );",
        )?;
        Ok(())
    }

    /// Drops the `reviews` table if it exists and clears the identity
    /// map, detaching nothing: cached handles keep their old ids.
    pub fn drop_table(&mut self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS reviews;")?;
        self.cache.clear();
        Ok(())
    }

    /// Inserts a new row from the review's current field values,
    /// assigns the store-generated id, and registers the handle in the
    /// identity map.
    ///
    /// Must be called on a transient review. There is no guard: saving
    /// an already-persisted handle inserts a second row and leaves the
    /// map entry for the old id pointing at the re-keyed object.
    pub fn save(&mut self, review: &SharedReview) -> RepoResult<()> {
        let id = {
            let current = review.borrow();
            self.conn.execute(
                "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                params![current.year(), current.summary(), current.employee_id()],
            )?;
            self.conn.last_insert_rowid()
        };

        review.borrow_mut().set_id(Some(id));
        self.cache.insert(id, Rc::clone(review));
        Ok(())
    }

    /// Constructs, validates, and saves a review in one step, returning
    /// the live handle.
    pub fn create(
        &mut self,
        year: i32,
        summary: impl Into<String>,
        employee_id: i64,
    ) -> RepoResult<SharedReview> {
        let review = Review::new(year, summary, employee_id, &self.directory)?;
        let review = review.into_shared();
        self.save(&review)?;
        Ok(review)
    }

    /// Returns the canonical in-memory object for a raw row.
    ///
    /// If the row id is already cached, the cached object's fields are
    /// refreshed in place through the validating setters and the same
    /// handle is returned; otherwise a new object is constructed,
    /// assigned the row id, and registered. Never allocates a second
    /// object for a cached id.
    ///
    /// # Errors
    /// - `Validation` when the persisted row no longer satisfies the
    ///   field constraints, e.g. the referenced employee was deleted.
    pub fn instance_from_db(&mut self, row: &ReviewRow) -> RepoResult<SharedReview> {
        if let Some(existing) = self.cache.get(&row.id).map(Rc::clone) {
            {
                let mut cached = existing.borrow_mut();
                cached.set_year(row.year)?;
                cached.set_summary(row.summary.clone())?;
                cached.set_employee_id(row.employee_id, &self.directory)?;
            }
            return Ok(existing);
        }

        let mut review = Review::new(row.year, row.summary.clone(), row.employee_id, &self.directory)?;
        review.set_id(Some(row.id));
        let shared = review.into_shared();
        self.cache.insert(row.id, Rc::clone(&shared));
        Ok(shared)
    }

    /// Looks a review up by primary key.
    ///
    /// Absence is `Ok(None)`, never an error.
    pub fn find_by_id(&mut self, id: i64) -> RepoResult<Option<SharedReview>> {
        let conn = self.conn;
        let row = conn
            .query_row(
                &format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"),
                params![id],
                read_row,
            )
            .optional()?;

        match row {
            Some(row) => Ok(Some(self.instance_from_db(&row)?)),
            None => Ok(None),
        }
    }

    /// Rewrites the row matching the review's id with its current
    /// field values.
    ///
    /// # Errors
    /// - `Detached` when the review has no persisted id.
    /// - `NotFound` when no row matched the id.
    pub fn update(&self, review: &SharedReview) -> RepoResult<()> {
        let current = review.borrow();
        let id = current.id().ok_or(RepoError::Detached)?;

        let changed = self.conn.execute(
            "UPDATE reviews SET year = ?1, summary = ?2, employee_id = ?3 WHERE id = ?4;",
            params![current.year(), current.summary(), current.employee_id(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    /// Deletes the review's row, evicts it from the identity map, and
    /// resets its id to `None`.
    ///
    /// The row delete happens before map eviction: on `NotCached` the
    /// row is already gone while the handle still carries its old id.
    ///
    /// # Errors
    /// - `Detached` when the review has no persisted id.
    /// - `NotCached` when the id is absent from the identity map.
    pub fn delete(&mut self, review: &SharedReview) -> RepoResult<()> {
        let id = review.borrow().id().ok_or(RepoError::Detached)?;

        self.conn
            .execute("DELETE FROM reviews WHERE id = ?1;", params![id])?;

        if self.cache.remove(&id).is_none() {
            return Err(RepoError::NotCached(id));
        }

        review.borrow_mut().set_id(None);
        Ok(())
    }

    /// Fetches every row in storage order, each canonicalized through
    /// `instance_from_db`.
    pub fn get_all(&mut self) -> RepoResult<Vec<SharedReview>> {
        let conn = self.conn;
        let mut stmt = conn.prepare(&format!("{REVIEW_SELECT_SQL};"))?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);

        let mut reviews = Vec::with_capacity(rows.len());
        for row in &rows {
            reviews.push(self.instance_from_db(row)?);
        }
        Ok(reviews)
    }

    /// Returns the cached handle for an id, if any.
    ///
    /// Exposes identity-map state for callers that need to inspect it;
    /// does not touch the database.
    pub fn cached(&self, id: i64) -> Option<SharedReview> {
        self.cache.get(&id).map(Rc::clone)
    }

    /// Number of entries currently held by the identity map.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        id: row.get(0)?,
        year: row.get(1)?,
        summary: row.get(2)?,
        employee_id: row.get(3)?,
    })
}
