//! File-backed session storage.
//!
//! Each key maps to `<dir>/<key>.json`. All access goes through a cap-std
//! [`Dir`] handle so keys cannot escape the configured directory.

use std::io;
use std::path::Path;

use cap_std::ambient_authority;
use cap_std::fs::Dir;

use super::atomic_io::write_atomic;
use crate::domain::ports::{SessionStorage, StorageError};

/// Durable storage rooted at one directory.
#[derive(Debug)]
pub struct FileSessionStorage {
    dir: Dir,
}

impl FileSessionStorage {
    /// Open `path`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir })
    }

    /// Wrap an already opened directory handle.
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

fn file_name(key: &str) -> Result<String, StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if valid {
        Ok(format!("{key}.json"))
    } else {
        Err(StorageError::invalid_key(key))
    }
}

impl SessionStorage for FileSessionStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let name = file_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::read(key, err.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let name = file_name(key)?;
        write_atomic(&self.dir, &name, value).map_err(|err| StorageError::write(key, err.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let name = file_name(key)?;
        match self.dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::remove(key, err.to_string())),
        }
    }
}
