//! In-memory adapter for tests and throwaway stores.

use super::{StorageError, StorageResult, UserStorage};
use crate::model::user::User;
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Storage that keeps the last saved collection in memory.
///
/// Clones share the same contents, so a test can keep one handle and hand
/// another to a store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    users: Rc<RefCell<Vec<User>>>,
    fail_saves: Rc<Cell<bool>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the storage as if `users` had been saved earlier.
    pub fn with_users(users: Vec<User>) -> Self {
        let storage = Self::default();
        *storage.users.borrow_mut() = users;
        storage
    }

    /// Returns a copy of the last saved collection.
    pub fn snapshot(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    /// Makes subsequent saves fail with an I/O error until reset.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl UserStorage for InMemoryStorage {
    fn load(&self) -> StorageResult<Vec<User>> {
        Ok(self.snapshot())
    }

    fn save(&self, users: &[User]) -> StorageResult<()> {
        if self.fail_saves.get() {
            return Err(StorageError::Io {
                path: PathBuf::from(":memory:"),
                source: io::Error::new(io::ErrorKind::Other, "simulated save failure"),
            });
        }
        *self.users.borrow_mut() = users.to_vec();
        Ok(())
    }
}
