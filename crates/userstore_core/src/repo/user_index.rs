//! Derived lookup index over the user collection.
//!
//! # Responsibility
//! - Map email, normalized name and id to the owning record.
//! - Detect duplicate keys when built from untrusted (loaded) data.
//!
//! # Invariants
//! - Never authoritative: always rebuildable from the collection alone.
//! - Never persisted.
//! - Name keys are trimmed, whitespace-collapsed and lowercased.

use crate::model::user::{User, UserId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Key collision found while building an index from a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexConflict {
    DuplicateId(UserId),
    DuplicateEmail(String),
}

impl Display for IndexConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate user id {id}"),
            Self::DuplicateEmail(email) => write!(f, "duplicate email `{email}`"),
        }
    }
}

impl Error for IndexConflict {}

/// Normalizes a name into its index key.
pub fn normalize_name(name: &str) -> String {
    WHITESPACE_RE.replace_all(name.trim(), " ").to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIndex {
    by_email: HashMap<String, UserId>,
    by_name: HashMap<String, Vec<UserId>>,
    positions: HashMap<UserId, usize>,
}

impl UserIndex {
    /// Builds an index, rejecting collections that repeat an id or email.
    pub fn try_build(users: &[User]) -> Result<Self, IndexConflict> {
        let mut index = Self::default();
        for (position, user) in users.iter().enumerate() {
            if index.positions.contains_key(&user.id) {
                return Err(IndexConflict::DuplicateId(user.id));
            }
            if index.by_email.contains_key(&user.email) {
                return Err(IndexConflict::DuplicateEmail(user.email.clone()));
            }
            index.insert(user, position);
        }
        Ok(index)
    }

    /// Rebuilds from scratch after a structural change.
    ///
    /// Callers guarantee `users` already satisfies key uniqueness.
    pub fn rebuild(&mut self, users: &[User]) {
        self.clear();
        for (position, user) in users.iter().enumerate() {
            self.insert(user, position);
        }
    }

    /// Registers one record stored at `position`.
    pub fn insert(&mut self, user: &User, position: usize) {
        self.by_email.insert(user.email.clone(), user.id);
        self.by_name
            .entry(normalize_name(&user.name))
            .or_default()
            .push(user.id);
        self.positions.insert(user.id, position);
    }

    pub fn clear(&mut self) {
        self.by_email.clear();
        self.by_name.clear();
        self.positions.clear();
    }

    pub fn find_id_by_email(&self, email: &str) -> Option<UserId> {
        self.by_email.get(email).copied()
    }

    /// Returns ids whose normalized name equals the normalized `name`, in
    /// collection order.
    pub fn find_ids_by_name(&self, name: &str) -> &[UserId] {
        self.by_name
            .get(&normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn position_of(&self, id: UserId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_name, IndexConflict, UserIndex};
    use crate::model::user::User;

    fn user(id: u64, name: &str, email: &str) -> User {
        User::new(id, name, email, 30).unwrap()
    }

    #[test]
    fn normalize_name_collapses_whitespace_and_case() {
        assert_eq!(normalize_name("  Ann \t  LEE "), "ann lee");
    }

    #[test]
    fn try_build_rejects_duplicate_email() {
        let users = vec![user(1, "a", "same@x.com"), user(2, "b", "same@x.com")];
        assert_eq!(
            UserIndex::try_build(&users).unwrap_err(),
            IndexConflict::DuplicateEmail("same@x.com".to_string())
        );
    }

    #[test]
    fn try_build_rejects_duplicate_id() {
        let users = vec![user(7, "a", "a@x.com"), user(7, "b", "b@x.com")];
        assert_eq!(
            UserIndex::try_build(&users).unwrap_err(),
            IndexConflict::DuplicateId(7)
        );
    }

    #[test]
    fn rebuild_tracks_shifted_positions() {
        let mut users = vec![
            user(1, "Ann", "ann@x.com"),
            user(2, "Bo", "bo@x.com"),
            user(3, "ann", "ann2@x.com"),
        ];
        let mut index = UserIndex::try_build(&users).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.find_ids_by_name("ANN"), &[1, 3]);

        users.remove(0);
        index.rebuild(&users);
        assert_eq!(index.position_of(2), Some(0));
        assert_eq!(index.position_of(3), Some(1));
        assert_eq!(index.position_of(1), None);
        assert_eq!(index.find_id_by_email("ann@x.com"), None);
        assert_eq!(index.find_ids_by_name("ann"), &[3]);

        index.clear();
        assert!(index.is_empty());
    }
}
