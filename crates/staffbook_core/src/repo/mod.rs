//! Repository layer for review persistence.
//!
//! # Responsibility
//! - Provide CRUD over the `reviews` table as fixed parameterized
//!   statements.
//! - Own the identity map so each persisted row has at most one live
//!   in-memory object.
//!
//! # Invariants
//! - Repository writes only accept records that passed model
//!   validation.
//! - Row loads are canonicalized through the identity map, never
//!   duplicated.

pub mod review_repo;
