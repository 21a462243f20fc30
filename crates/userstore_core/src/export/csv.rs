//! CSV export of the user collection.
//!
//! # Invariants
//! - Column order is fixed by [`EXPORT_COLUMNS`].
//! - The header row is written even for an empty collection.
//! - `created_at` is written in RFC 3339.

use super::{ExportError, ExportResult};
use crate::model::user::User;
use log::{error, info};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

pub const EXPORT_COLUMNS: [&str; 6] = ["id", "name", "email", "age", "is_active", "created_at"];

/// Writes header plus one row per user to `writer`.
///
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(users: &[User], writer: W) -> ExportResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_COLUMNS)?;
    for user in users {
        csv_writer.write_record([
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.age.to_string(),
            user.is_active.to_string(),
            user.created_at.to_rfc3339(),
        ])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(users.len())
}

/// Creates (or truncates) `path` and exports `users` into it.
pub fn export_csv(users: &[User], path: impl AsRef<Path>) -> ExportResult<usize> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let file = File::create(path).map_err(|source| {
        error!(
            "event=export_csv module=export status=error error_code=create_failed error={}",
            source
        );
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    match write_csv(users, file) {
        Ok(rows) => {
            info!(
                "event=export_csv module=export status=ok rows={} duration_ms={}",
                rows,
                started_at.elapsed().as_millis()
            );
            Ok(rows)
        }
        Err(err) => {
            error!(
                "event=export_csv module=export status=error error_code=write_failed error={}",
                err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::write_csv;
    use crate::model::user::User;

    #[test]
    fn quotes_fields_containing_separators() {
        let user = User::new(1, "Lee, Ann", "ann@x.com", 25).unwrap();
        let mut buf = Vec::new();
        write_csv(&[user], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("1,\"Lee, Ann\",ann@x.com,25,true,"));
    }
}
