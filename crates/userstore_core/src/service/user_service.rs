//! User use-case service.
//!
//! # Responsibility
//! - Provide one entry point for user CRUD, queries and export.
//! - Delegate writes to the store and reads to stateless filters.
//!
//! # Invariants
//! - Service APIs never bypass store validation/persistence contracts.
//! - Service layer remains storage-agnostic; only `open` picks a backend.

use crate::config::StoreConfig;
use crate::export::csv::export_csv;
use crate::export::ExportResult;
use crate::model::user::{User, UserId, UserValidationError};
use crate::repo::user_store::{StoreResult, UserStore};
use crate::search::filter::{self, UserFilter};
use crate::storage::{JsonFileStorage, UserStorage};
use std::path::{Path, PathBuf};

/// Use-case service wrapper over a [`UserStore`].
pub struct UserService<S: UserStorage> {
    store: UserStore<S>,
    export_file: PathBuf,
}

impl UserService<JsonFileStorage> {
    /// Opens a JSON-file backed service described by `config`.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let storage = JsonFileStorage::new(config.data_file.clone());
        let store = UserStore::open_with_policy(storage, config.age_policy)?;
        Ok(Self {
            store,
            export_file: config.export_file.clone(),
        })
    }
}

impl<S: UserStorage> UserService<S> {
    /// Wraps an already opened store, exporting to the default CSV path.
    pub fn new(store: UserStore<S>) -> Self {
        Self {
            store,
            export_file: StoreConfig::default().export_file,
        }
    }

    /// Adds a user and returns its id.
    pub fn add_user(&mut self, name: &str, email: &str, age: i64) -> StoreResult<UserId> {
        self.store.add(name, email, age)
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.store.get_by_id(id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.store.find_by_email(email)
    }

    /// Users aged within `[min_age, max_age]`, in insertion order.
    pub fn users_by_age_range(
        &self,
        min_age: i64,
        max_age: i64,
    ) -> Result<Vec<&User>, UserValidationError> {
        filter::by_age_range(self.store.get_all(), min_age, max_age)
    }

    /// Case-insensitive name search; an empty term returns everyone.
    pub fn search_users_by_name(&self, term: &str) -> Vec<&User> {
        filter::by_name_substring(self.store.get_all(), term)
    }

    pub fn users_by_status(&self, is_active: bool) -> Vec<&User> {
        filter::by_status(self.store.get_all(), is_active)
    }

    pub fn filter_users(&self, query: &UserFilter) -> Result<Vec<&User>, UserValidationError> {
        query.apply(self.store.get_all())
    }

    pub fn update_user_status(&mut self, id: UserId, is_active: bool) -> StoreResult<bool> {
        self.store.update_status(id, is_active)
    }

    pub fn delete_user(&mut self, id: UserId) -> StoreResult<bool> {
        self.store.delete(id)
    }

    pub fn active_user_count(&self) -> usize {
        self.store.count_active()
    }

    pub fn user_count(&self) -> usize {
        self.store.count()
    }

    pub fn all_users(&self) -> &[User] {
        self.store.get_all()
    }

    /// Exports to the configured CSV file.
    pub fn export_csv(&self) -> ExportResult<usize> {
        export_csv(self.store.get_all(), &self.export_file)
    }

    pub fn export_csv_to(&self, path: impl AsRef<Path>) -> ExportResult<usize> {
        export_csv(self.store.get_all(), path)
    }

    pub fn export_file(&self) -> &Path {
        &self.export_file
    }

    /// Removes every user. Cannot be undone.
    pub fn clear_all_users(&mut self) -> StoreResult<()> {
        self.store.clear_all()
    }

    pub fn store(&self) -> &UserStore<S> {
        &self.store
    }
}
