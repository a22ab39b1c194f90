//! Persistence backends for the task collection.
//!
//! # Responsibility
//! - Define the whole-document load/save contract.
//! - Isolate file format and filesystem details from the service layer.
//!
//! # Invariants
//! - `load` distinguishes "never written" (empty map) from "written but
//!   unreadable" (`StoreError::Corrupt`).
//! - `save` is atomic with respect to concurrent readers.

use crate::model::task::{Task, TaskId};
use indexmap::IndexMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod json_file;

pub use json_file::JsonFileBackend;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while reading or writing the backing document.
///
/// The kinds stay distinct so callers can treat transient I/O differently
/// from permanent corruption.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem read/write failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing document exists but cannot be parsed.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The in-memory collection could not be serialized.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store I/O failure at `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(
                    f,
                    "store document at `{}` is corrupt: {source}",
                    path.display()
                )
            }
            Self::Serialize(source) => write!(f, "failed to serialize task collection: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::Serialize(source) => Some(source),
        }
    }
}

/// Whole-document persistence contract.
///
/// Deliberately narrow (full-collection load/save) so an embedded key-value
/// store can replace the flat file without touching the service layer.
pub trait TaskBackend {
    /// Returns the full id-to-task mapping in insertion order.
    ///
    /// An absent backing document yields an empty mapping, not an error.
    fn load(&self) -> StoreResult<IndexMap<TaskId, Task>>;

    /// Durably replaces the full mapping.
    ///
    /// A concurrent reader observes either the prior or the new document,
    /// never a torn write.
    fn save(&self, collection: &IndexMap<TaskId, Task>) -> StoreResult<()>;
}
