//! JSON file adapter.
//!
//! # Responsibility
//! - Persist users as a pretty-printed JSON array.
//! - Replace the file atomically on save.
//!
//! # Invariants
//! - Saves go through a sibling temp file, fsync, then rename, so a
//!   concurrent reader sees either the old or the new content.
//! - A missing or zero-length file loads as an empty collection.

use super::{StorageError, StorageResult, UserStorage};
use crate::model::user::User;
use log::{error, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// File-backed storage holding one JSON array of users.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomically(&self, users: &[User]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut temp, users)?;
        temp.write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl UserStorage for JsonFileStorage {
    fn load(&self) -> StorageResult<Vec<User>> {
        let started_at = Instant::now();

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=storage_load module=storage status=ok mode=missing_file count=0");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=storage_load module=storage status=error error_code=read_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            info!("event=storage_load module=storage status=ok mode=empty_file count=0");
            return Ok(Vec::new());
        }

        let users: Vec<User> = serde_json::from_slice(&bytes).map_err(|err| {
            error!(
                "event=storage_load module=storage status=error error_code=corrupt_data line={} column={}",
                err.line(),
                err.column()
            );
            StorageError::CorruptData {
                path: self.path.clone(),
                message: err.to_string(),
            }
        })?;

        info!(
            "event=storage_load module=storage status=ok mode=file count={} duration_ms={}",
            users.len(),
            started_at.elapsed().as_millis()
        );
        Ok(users)
    }

    fn save(&self, users: &[User]) -> StorageResult<()> {
        let started_at = Instant::now();

        match self.write_atomically(users) {
            Ok(()) => {
                info!(
                    "event=storage_save module=storage status=ok count={} duration_ms={}",
                    users.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=storage_save module=storage status=error count={} duration_ms={} error_code=write_failed error={}",
                    users.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(self.io_error(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::JsonFileStorage;
    use crate::storage::UserStorage;

    #[test]
    fn empty_collection_saves_as_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("users.json"));
        storage.save(&[]).unwrap();
        assert_eq!(std::fs::read_to_string(storage.path()).unwrap(), "[]\n");
    }
}
