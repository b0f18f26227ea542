//! Low-level JSON document store.
//!
//! One document per file under a single data directory. Whole-document
//! replacement goes through a temp file in the same directory followed by
//! a rename, so readers see either the old or the new document, never a
//! torn one. Append-only documents are JSON Lines.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::errors::StorageError;

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Write {
            document: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// Loads a document, or its `Default` when the file does not exist.
    ///
    /// A file that exists but cannot be decoded is an error, not a
    /// default; silently dropping persisted state would hide corruption.
    pub fn load_or_default<T>(&self, document: &str) -> Result<T, StorageError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.dir.join(document);
        if !path.exists() {
            return Ok(T::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| StorageError::Read {
            document: document.to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|e| StorageError::Decode {
            document: document.to_string(),
            message: e.to_string(),
        })
    }

    /// Replaces a document atomically via temp-file-then-rename.
    pub fn save<T: Serialize>(&self, document: &str, value: &T) -> Result<(), StorageError> {
        let write_err = |message: String| StorageError::Write {
            document: document.to_string(),
            message,
        };

        let json = serde_json::to_vec_pretty(value).map_err(|e| write_err(e.to_string()))?;

        // The temp file must live in the target directory; rename is only
        // atomic within one filesystem.
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| write_err(e.to_string()))?;
        tmp.write_all(&json).map_err(|e| write_err(e.to_string()))?;
        tmp.persist(self.dir.join(document))
            .map_err(|e| write_err(e.to_string()))?;
        Ok(())
    }

    /// Appends one JSON line per value to a JSON Lines document.
    pub fn append_lines<T: Serialize>(
        &self,
        document: &str,
        values: &[T],
    ) -> Result<(), StorageError> {
        let write_err = |message: String| StorageError::Write {
            document: document.to_string(),
            message,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(document))
            .map_err(|e| write_err(e.to_string()))?;

        for value in values {
            let line = serde_json::to_string(value).map_err(|e| write_err(e.to_string()))?;
            writeln!(file, "{}", line).map_err(|e| write_err(e.to_string()))?;
        }
        Ok(())
    }

    /// Reads every line of a JSON Lines document, oldest first.
    pub fn read_lines<T: DeserializeOwned>(&self, document: &str) -> Result<Vec<T>, StorageError> {
        let path = self.dir.join(document);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path).map_err(|e| StorageError::Read {
            document: document.to_string(),
            message: e.to_string(),
        })?;
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| StorageError::Decode {
                    document: document.to_string(),
                    message: e.to_string(),
                })
            })
            .collect()
    }
}
