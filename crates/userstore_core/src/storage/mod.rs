//! Persistence adapters for the user collection.
//!
//! # Responsibility
//! - Read and write the full user collection as one unit.
//! - Keep file format and I/O details out of the store.
//!
//! # Invariants
//! - Adapters know nothing about indices or uniqueness rules.
//! - `load(save(x)) == x` for every collection the store can hold.
//! - A missing backing file loads as an empty collection.

use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::InMemoryStorage;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    Io { path: PathBuf, source: io::Error },
    /// Persisted content exists but cannot be decoded into users.
    CorruptData { path: PathBuf, message: String },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage I/O failed for `{}`: {source}", path.display())
            }
            Self::CorruptData { path, message } => {
                write!(f, "corrupt user data in `{}`: {message}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::CorruptData { .. } => None,
        }
    }
}

/// Whole-collection persistence contract used by the store.
pub trait UserStorage {
    /// Loads every persisted user in stored order.
    fn load(&self) -> StorageResult<Vec<User>>;
    /// Replaces the persisted collection with `users`.
    fn save(&self, users: &[User]) -> StorageResult<()>;
}
