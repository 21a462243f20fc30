//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, query and export calls into use-case level APIs.
//! - Keep callers decoupled from storage details.

pub mod user_service;
