//! Persisted cart records.
//!
//! One JSON document per listing under the configured state directory,
//! named after the storage key (`cart_<house_id>.json`). Persistence is
//! best-effort throughout: a cart must keep working for the session even
//! when its record cannot be read or written.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::domain::types::HouseId;

/// Storage key for a listing's cart; a fixed key when no listing is known.
pub fn storage_key(house_id: Option<HouseId>) -> String {
    match house_id {
        Some(id) => format!("cart_{id}"),
        None => "cart".to_string(),
    }
}

/// Raw persisted-payload access, keyed like browser local storage.
pub trait CartStorage: Send + Sync {
    /// Returns the stored payload, or `None` when no record exists.
    fn load(&self, key: &str) -> io::Result<Option<String>>;
    /// Overwrites the record for `key` with the full payload.
    fn store(&self, key: &str, payload: &str) -> io::Result<()>;
}

/// File-per-key storage rooted at a state directory.
pub struct FileCartStorage {
    dir: PathBuf,
}

impl FileCartStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn store(&self, key: &str, payload: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), payload)
    }
}
