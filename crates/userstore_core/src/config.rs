//! Store configuration.
//!
//! # Responsibility
//! - Hold file locations and validation policy used to open a store.

use crate::model::user::AgePolicy;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "users.json";
pub const DEFAULT_EXPORT_FILE: &str = "users_export.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// JSON file holding the persisted collection.
    pub data_file: PathBuf,
    /// Default CSV target for `export_csv` calls without an explicit path.
    pub export_file: PathBuf,
    pub age_policy: AgePolicy,
}

impl StoreConfig {
    /// Config for `data_file` with default export target and age policy.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Self::default()
        }
    }

    pub fn with_export_file(mut self, export_file: impl Into<PathBuf>) -> Self {
        self.export_file = export_file.into();
        self
    }

    pub fn with_age_policy(mut self, age_policy: AgePolicy) -> Self {
        self.age_policy = age_policy;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            age_policy: AgePolicy::default(),
        }
    }
}
