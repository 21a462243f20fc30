//! Stateless filters over a user collection snapshot.
//!
//! # Responsibility
//! - Select users by id, age range, name substring and active status.
//!
//! # Invariants
//! - Results keep collection (insertion) order.
//! - Filters never mutate or re-sort the collection.

use crate::model::user::{User, UserId, UserValidationError};

/// Linear lookup by id. Prefer the store's indexed `get_by_id`.
pub fn by_id(users: &[User], id: UserId) -> Option<&User> {
    users.iter().find(|user| user.id == id)
}

/// Returns users with `min <= age <= max`.
///
/// # Errors
/// - `InvertedAgeRange` when `min > max`.
pub fn by_age_range(
    users: &[User],
    min: i64,
    max: i64,
) -> Result<Vec<&User>, UserValidationError> {
    check_age_range(min, max)?;
    Ok(users
        .iter()
        .filter(|user| (min..=max).contains(&user.age))
        .collect())
}

/// Case-insensitive substring match on `name`.
///
/// An empty term matches every user.
pub fn by_name_substring<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    if term.is_empty() {
        return users.iter().collect();
    }
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn by_status(users: &[User], is_active: bool) -> Vec<&User> {
    users
        .iter()
        .filter(|user| user.is_active == is_active)
        .collect()
}

/// Combined filter options; unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name_contains: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    /// Applies every set constraint.
    ///
    /// # Errors
    /// - `InvertedAgeRange` when both bounds are set and `min_age > max_age`.
    pub fn apply<'a>(&self, users: &'a [User]) -> Result<Vec<&'a User>, UserValidationError> {
        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            check_age_range(min, max)?;
        }
        let needle = self
            .name_contains
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        Ok(users
            .iter()
            .filter(|user| self.min_age.map_or(true, |min| user.age >= min))
            .filter(|user| self.max_age.map_or(true, |max| user.age <= max))
            .filter(|user| self.is_active.map_or(true, |active| user.is_active == active))
            .filter(|user| {
                needle
                    .as_deref()
                    .map_or(true, |needle| user.name.to_lowercase().contains(needle))
            })
            .collect())
    }
}

fn check_age_range(min: i64, max: i64) -> Result<(), UserValidationError> {
    if min > max {
        return Err(UserValidationError::InvertedAgeRange { min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{by_age_range, by_name_substring, UserFilter};
    use crate::model::user::{User, UserValidationError};

    fn sample() -> Vec<User> {
        vec![
            User::new(1, "Nguyễn Văn An", "an@example.com", 25).unwrap(),
            User::new(2, "Trần Thị Bình", "binh@example.com", 30).unwrap(),
            User::new(3, "Lê Văn Cường", "cuong@example.com", 28).unwrap(),
        ]
    }

    #[test]
    fn age_range_is_inclusive() {
        let users = sample();
        let ids: Vec<_> = by_age_range(&users, 25, 28)
            .unwrap()
            .iter()
            .map(|user| user.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn name_search_folds_unicode_case() {
        let users = sample();
        let hits = by_name_substring(&users, "NGUYỄN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        assert_eq!(by_name_substring(&users, "văn").len(), 2);
    }

    #[test]
    fn combined_filter_rejects_inverted_bounds() {
        let filter = UserFilter {
            min_age: Some(40),
            max_age: Some(20),
            ..UserFilter::default()
        };
        assert_eq!(
            filter.apply(&sample()).unwrap_err(),
            UserValidationError::InvertedAgeRange { min: 40, max: 20 }
        );
    }

    #[test]
    fn combined_filter_intersects_constraints() {
        let mut users = sample();
        users[2].is_active = false;
        let filter = UserFilter {
            name_contains: Some("văn".to_string()),
            is_active: Some(true),
            ..UserFilter::default()
        };
        let hits = filter.apply(&users).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }
}
