use std::{
    fs,
    path::{Path, PathBuf},
};

use log::warn;

use super::{Storage, StorageError};

/// Stores each key as a file inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(error) => {
                if error.kind() != std::io::ErrorKind::NotFound {
                    warn!("Unable to read {}: {}", path.display(), error);
                }
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let write_failed = |error: std::io::Error| StorageError::WriteFailed {
            key: key.to_string(),
            message: error.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(write_failed)?;

        let path = self.path(key);
        let staging = self.dir.join(format!(".{key}.tmp"));
        fs::write(&staging, value).map_err(write_failed)?;
        fs::rename(&staging, &path).map_err(write_failed)
    }
}
