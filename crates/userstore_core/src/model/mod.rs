//! Domain model for stored user records.
//!
//! # Responsibility
//! - Define the fixed-field user record and its validation rules.
//!
//! # Invariants
//! - Every user is identified by a store-assigned `UserId`.
//! - Deletion removes the record; there are no tombstones.

pub mod user;
