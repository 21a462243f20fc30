//! Record store and its derived index.
//!
//! # Responsibility
//! - Own the authoritative user collection and id assignment.
//! - Keep lookup structures consistent with the collection.
//!
//! # Invariants
//! - Writes validate before mutating and persist after mutating.
//! - Lookup misses are reported as absence, never as errors.

pub mod user_index;
pub mod user_store;
