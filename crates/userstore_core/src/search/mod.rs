//! Query and filter entry points.
//!
//! # Responsibility
//! - Expose stateless selections over the current user collection.
//! - Keep result shaping inside core.

pub mod filter;
