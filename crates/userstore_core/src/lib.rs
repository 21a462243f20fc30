//! Core domain logic for the user store.
//! This crate is the single source of truth for user record invariants.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;

pub use config::StoreConfig;
pub use export::csv::{export_csv, write_csv, EXPORT_COLUMNS};
pub use export::{ExportError, ExportResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::user::{AgePolicy, User, UserId, UserValidationError};
pub use repo::user_index::{IndexConflict, UserIndex};
pub use repo::user_store::{StoreError, StoreResult, UserStore};
pub use search::filter::UserFilter;
pub use service::user_service::UserService;
pub use storage::{InMemoryStorage, JsonFileStorage, StorageError, StorageResult, UserStorage};

/// Minimal health-check API for smoke binaries.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
