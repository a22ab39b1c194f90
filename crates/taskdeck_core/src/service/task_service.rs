//! Task CRUD and filtered listing over a persistence backend.
//!
//! # Responsibility
//! - Validate input before any write reaches the backend.
//! - Serialize every load-mutate-save cycle behind one write lock.
//!
//! # Invariants
//! - The service is the sole writer of the collection; no caller invokes
//!   `save` directly.
//! - `id` and `created_at` survive every update unchanged.
//! - A failed validation performs no write.

use crate::model::task::{Task, TaskId, TaskPriority, TaskStatus};
use crate::model::validate::{validate_draft, validate_patch, TaskDraft, TaskPatch, Violation};
use crate::store::{StoreError, TaskBackend};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a service operation, with three stable kinds.
///
/// `Validation` and `NotFound` are expected control flow; `Store` is a
/// service-level fault the outer layer should surface prominently.
#[derive(Debug)]
pub enum ServiceError {
    Validation(Vec<Violation>),
    NotFound(TaskId),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(violations) => {
                write!(f, "validation failed: ")?;
                for (index, violation) in violations.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{violation}")?;
                }
                Ok(())
            }
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(_) => None,
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Optional filters for listing tasks. Both present means logical AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl ListFilter {
    fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status == status)
            && self.priority.is_none_or(|priority| task.priority == priority)
    }
}

/// CRUD orchestration over a [`TaskBackend`].
///
/// Constructed once at process startup and passed by reference; there is no
/// ambient global store state.
pub struct TaskService<B: TaskBackend> {
    backend: B,
    // Serializes every load-mutate-save cycle. Reads skip it: load/save are
    // individually atomic at the file level, so a read concurrent with a
    // write sees the old or new document, never a torn one.
    write_lock: Mutex<()>,
}

impl<B: TaskBackend> TaskService<B> {
    /// Creates a service over the provided backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Validates the draft and persists a new task.
    ///
    /// # Contract
    /// - Any violation fails the call with `ServiceError::Validation` and
    ///   performs no write.
    /// - Unset status/priority default to `pending` / `medium`.
    /// - Returns the created task with generated `id` and `created_at`.
    pub fn create(&self, draft: &TaskDraft) -> ServiceResult<Task> {
        let violations = validate_draft(draft);
        if !violations.is_empty() {
            return Err(ServiceError::Validation(violations));
        }

        // Validation guarantees both parses succeed.
        let status = draft.status.as_deref().and_then(TaskStatus::parse);
        let priority = draft.priority.as_deref().and_then(TaskPriority::parse);
        let task = Task::new(
            draft.title.clone(),
            draft.description.clone(),
            status,
            priority,
        );

        let guard = self.lock_writes();
        let mut collection = self.backend.load()?;
        collection.insert(task.id, task.clone());
        self.backend.save(&collection)?;
        drop(guard);

        info!(
            "event=task_create module=service status=ok id={} task_status={} priority={}",
            task.id,
            task.status.as_str(),
            task.priority.as_str()
        );
        Ok(task)
    }

    /// Returns the task for `id`, or `NotFound` if absent. Read-only.
    pub fn get(&self, id: TaskId) -> ServiceResult<Task> {
        let collection = self.backend.load()?;
        collection
            .get(&id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }

    /// Returns all tasks matching the filter, in insertion order.
    ///
    /// An empty result is not an error.
    pub fn list(&self, filter: &ListFilter) -> ServiceResult<Vec<Task>> {
        let collection = self.backend.load()?;
        Ok(collection
            .into_values()
            .filter(|task| filter.matches(task))
            .collect())
    }

    /// Total number of stored tasks.
    pub fn count(&self) -> ServiceResult<usize> {
        Ok(self.backend.load()?.len())
    }

    /// Applies the fields present in `patch` to an existing task.
    ///
    /// # Contract
    /// - `NotFound` if `id` is absent; the lookup happens before validation,
    ///   so an unknown id reports `NotFound` even when the patch is also
    ///   invalid.
    /// - `Validation` (no write) on violations.
    /// - `id` and `created_at` are untouchable: `TaskPatch` cannot carry
    ///   them.
    pub fn update(&self, id: TaskId, patch: &TaskPatch) -> ServiceResult<Task> {
        let guard = self.lock_writes();
        let mut collection = self.backend.load()?;
        let task = collection.get_mut(&id).ok_or(ServiceError::NotFound(id))?;

        let violations = validate_patch(patch);
        if !violations.is_empty() {
            return Err(ServiceError::Validation(violations));
        }

        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(status) = patch.status.as_deref().and_then(TaskStatus::parse) {
            task.status = status;
        }
        if let Some(priority) = patch.priority.as_deref().and_then(TaskPriority::parse) {
            task.priority = priority;
        }

        let updated = task.clone();
        self.backend.save(&collection)?;
        drop(guard);

        debug!(
            "event=task_update module=service status=ok id={}",
            updated.id
        );
        Ok(updated)
    }

    /// Removes the task for `id` and returns it.
    ///
    /// A second delete of the same id fails with `NotFound`.
    pub fn delete(&self, id: TaskId) -> ServiceResult<Task> {
        let guard = self.lock_writes();
        let mut collection = self.backend.load()?;
        // shift_remove keeps insertion order for the survivors.
        let removed = collection
            .shift_remove(&id)
            .ok_or(ServiceError::NotFound(id))?;
        self.backend.save(&collection)?;
        drop(guard);

        info!("event=task_delete module=service status=ok id={id}");
        Ok(removed)
    }

    fn lock_writes(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means another writer panicked mid-cycle; the
        // on-disk document is still a complete old-or-new snapshot, so
        // continuing is safe.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
