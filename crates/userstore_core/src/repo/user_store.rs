//! Authoritative in-memory user store with write-through persistence.
//!
//! # Responsibility
//! - Own the user collection, its derived index and the id counter.
//! - Enforce validation and key uniqueness on every write.
//! - Persist the full collection after every successful mutation.
//!
//! # Invariants
//! - No two users share an `id` or an `email`.
//! - Within one open store, `next_id` is greater than every id assigned
//!   since the last `clear_all`, so ids are never reused after deletion.
//!   Reopening recomputes it from the highest persisted id.
//! - The index matches the collection whenever a method returns.
//! - Rejected writes leave the collection untouched.
//! - A failed save keeps the post-mutation in-memory state and marks the
//!   store dirty until the next successful save.

use crate::model::user::{
    validate_email, validate_name, AgePolicy, User, UserId, UserValidationError,
};
use crate::repo::user_index::UserIndex;
use crate::storage::{StorageError, UserStorage};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIRST_USER_ID: UserId = 1;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Validation(UserValidationError),
    DuplicateKey { email: String },
    /// The id counter reached `UserId::MAX`.
    IdsExhausted,
    CorruptData(String),
    Persistence(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateKey { email } => write!(f, "email already registered: `{email}`"),
            Self::IdsExhausted => write!(f, "no user ids left to assign"),
            Self::CorruptData(message) => write!(f, "corrupt persisted user data: {message}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::DuplicateKey { .. } => None,
            Self::IdsExhausted => None,
            Self::CorruptData(_) => None,
        }
    }
}

impl From<UserValidationError> for StoreError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::CorruptData { .. } => Self::CorruptData(value.to_string()),
            other => Self::Persistence(other),
        }
    }
}

/// User store over a pluggable persistence adapter.
///
/// Single-actor: mutations take `&mut self` and there is no internal
/// locking.
pub struct UserStore<S: UserStorage> {
    storage: S,
    users: Vec<User>,
    index: UserIndex,
    next_id: UserId,
    age_policy: AgePolicy,
    dirty: bool,
}

impl<S: UserStorage> UserStore<S> {
    /// Loads the persisted collection with the default age policy.
    pub fn open(storage: S) -> StoreResult<Self> {
        Self::open_with_policy(storage, AgePolicy::default())
    }

    /// Loads the persisted collection and rebuilds the index.
    ///
    /// # Errors
    /// - `CorruptData` when the content cannot be decoded or repeats an id
    ///   or email.
    /// - `Persistence` when the backing storage cannot be read.
    pub fn open_with_policy(storage: S, age_policy: AgePolicy) -> StoreResult<Self> {
        let mut store = Self {
            storage,
            users: Vec::new(),
            index: UserIndex::default(),
            next_id: FIRST_USER_ID,
            age_policy,
            dirty: false,
        };
        store.reload()?;
        Ok(store)
    }

    /// Replaces in-memory state with the persisted collection.
    ///
    /// On error the current state is kept as is.
    pub fn reload(&mut self) -> StoreResult<()> {
        let users = self.storage.load()?;
        let index = UserIndex::try_build(&users).map_err(|conflict| {
            error!(
                "event=store_load module=repo status=error error_code=key_conflict error={}",
                conflict
            );
            StoreError::CorruptData(conflict.to_string())
        })?;
        let next_id = match users.iter().map(|user| user.id).max() {
            Some(max_id) => max_id.checked_add(1).ok_or_else(|| {
                StoreError::CorruptData(format!("user id {max_id} leaves no room for new ids"))
            })?,
            None => FIRST_USER_ID,
        };

        info!(
            "event=store_load module=repo status=ok count={} next_id={}",
            users.len(),
            next_id
        );
        self.users = users;
        self.index = index;
        self.next_id = next_id;
        self.dirty = false;
        Ok(())
    }

    /// Adds an active user and returns its new id.
    ///
    /// # Errors
    /// - `Validation` for a blank name/email or an age outside the policy.
    /// - `DuplicateKey` when the email is already registered.
    /// - `IdsExhausted` when no id after this one could be assigned.
    /// - `Persistence` when the save fails; the user stays in memory.
    pub fn add(&mut self, name: &str, email: &str, age: i64) -> StoreResult<UserId> {
        validate_name(name)?;
        validate_email(email)?;
        self.age_policy.check(age)?;
        if self.index.find_id_by_email(email).is_some() {
            warn!("event=user_add module=repo status=rejected error_code=duplicate_email");
            return Err(StoreError::DuplicateKey {
                email: email.to_string(),
            });
        }

        let id = self.next_id;
        let Some(next_id) = id.checked_add(1) else {
            error!("event=user_add module=repo status=error error_code=ids_exhausted id={id}");
            return Err(StoreError::IdsExhausted);
        };
        let user = User::new(id, name, email, age)?;
        self.index.insert(&user, self.users.len());
        self.users.push(user);
        self.next_id = next_id;

        info!("event=user_add module=repo status=ok id={id}");
        self.persist("user_add")?;
        Ok(id)
    }

    /// Returns the user with `id`, if present.
    pub fn get_by_id(&self, id: UserId) -> Option<&User> {
        self.index
            .position_of(id)
            .and_then(|position| self.users.get(position))
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.find_id_by_email(email).and_then(|id| self.get_by_id(id))
    }

    pub fn find_id_by_email(&self, email: &str) -> Option<UserId> {
        self.index.find_id_by_email(email)
    }

    /// Ids of users whose normalized name equals `name`.
    pub fn find_ids_by_name(&self, name: &str) -> &[UserId] {
        self.index.find_ids_by_name(name)
    }

    /// Sets `is_active` for one user.
    ///
    /// Returns `Ok(false)` when no user has `id`.
    pub fn update_status(&mut self, id: UserId, is_active: bool) -> StoreResult<bool> {
        let Some(position) = self.index.position_of(id) else {
            return Ok(false);
        };
        self.users[position].is_active = is_active;

        info!("event=user_update_status module=repo status=ok id={id} is_active={is_active}");
        self.persist("user_update_status")?;
        Ok(true)
    }

    /// Removes one user and its index entries.
    ///
    /// Returns `Ok(false)` when no user has `id`. The id is not reused.
    pub fn delete(&mut self, id: UserId) -> StoreResult<bool> {
        let Some(position) = self.index.position_of(id) else {
            return Ok(false);
        };
        self.users.remove(position);
        self.index.rebuild(&self.users);

        info!("event=user_delete module=repo status=ok id={id}");
        self.persist("user_delete")?;
        Ok(true)
    }

    /// Removes every user and restarts ids at 1.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        let removed = self.users.len();
        self.users.clear();
        self.index.clear();
        self.next_id = FIRST_USER_ID;

        info!("event=user_clear module=repo status=ok removed={removed}");
        self.persist("user_clear")
    }

    pub fn get_all(&self) -> &[User] {
        &self.users
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }

    pub fn count_active(&self) -> usize {
        self.users.iter().filter(|user| user.is_active).count()
    }

    pub fn age_policy(&self) -> AgePolicy {
        self.age_policy
    }

    /// Id the next successful `add` will assign.
    pub fn next_id(&self) -> UserId {
        self.next_id
    }

    /// Whether in-memory state has diverged from storage after a failed save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Retries persisting the current collection.
    pub fn save(&mut self) -> StoreResult<()> {
        self.persist("store_save")
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self, op: &'static str) -> StoreResult<()> {
        match self.storage.save(&self.users) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                warn!(
                    "event=store_persist module=repo status=error op={op} diverged=true count={}",
                    self.users.len()
                );
                Err(err.into())
            }
        }
    }
}
