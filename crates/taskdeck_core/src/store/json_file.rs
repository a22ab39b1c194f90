//! JSON flat-file backend.
//!
//! # Responsibility
//! - Persist the task collection as one JSON document on disk.
//! - Guarantee atomic replacement via temp-file-then-rename.
//!
//! # Invariants
//! - The final path only ever holds a complete document.
//! - Corrupt content is reported, never silently replaced with an empty
//!   collection.

use super::{StoreError, StoreResult, TaskBackend};
use crate::model::task::{Task, TaskId};
use indexmap::IndexMap;
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Flat-file backend storing the collection as a single JSON object keyed by
/// task id, in insertion order.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend over the given document path.
    ///
    /// The file is not created eagerly; a store that was never written reads
    /// back as an empty collection.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskBackend for JsonFileBackend {
    fn load(&self) -> StoreResult<IndexMap<TaskId, Task>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(IndexMap::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error path={} error_code=io error={}",
                    self.path.display(),
                    err
                );
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(collection) => Ok(collection),
            Err(err) => {
                error!(
                    "event=store_load module=store status=error path={} error_code=corrupt error={}",
                    self.path.display(),
                    err
                );
                Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }

    fn save(&self, collection: &IndexMap<TaskId, Task>) -> StoreResult<()> {
        let started_at = Instant::now();
        let document =
            serde_json::to_vec_pretty(collection).map_err(StoreError::Serialize)?;

        // The temp file must live in the destination directory: rename is
        // only atomic within one filesystem.
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let result = NamedTempFile::new_in(parent)
            .and_then(|mut temp| {
                use std::io::Write;
                temp.write_all(&document)?;
                temp.as_file().sync_all()?;
                temp.persist(&self.path).map_err(|err| err.error)?;
                Ok(())
            })
            .map_err(|err| StoreError::Io {
                path: self.path.clone(),
                source: err,
            });

        match &result {
            Ok(()) => debug!(
                "event=store_save module=store status=ok path={} tasks={} duration_ms={}",
                self.path.display(),
                collection.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error path={} error_code=io error={}",
                self.path.display(),
                err
            ),
        }
        result
    }
}
