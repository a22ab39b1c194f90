//! Task domain record and closed value sets.
//!
//! # Responsibility
//! - Define the canonical `Task` record persisted by the store.
//! - Provide parse/format helpers for the closed status/priority sets.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is epoch milliseconds, stamped once, and monotonically
//!   non-decreasing across creations in the same process.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every managed task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Created but not started.
    Pending,
    /// Work is underway.
    InProgress,
    /// Finished successfully.
    Completed,
}

impl TaskStatus {
    /// All members of the closed set, in canonical order.
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a wire name, rejecting anything outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Priority level of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// All members of the closed set, in canonical order.
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire name of this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a wire name, rejecting anything outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Canonical task record.
///
/// The store owns every instance; reads hand out independent copies, so no
/// caller ever holds a mutable alias into persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID used for lookup and deletion.
    pub id: TaskId,
    /// Non-empty, at most 200 characters.
    pub title: String,
    /// Optional free text, at most 1000 characters.
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Unix epoch milliseconds, assigned once at creation.
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a generated stable ID and a fresh creation stamp.
    ///
    /// Unset status/priority fall back to the documented defaults
    /// (`pending` / `medium`).
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
        priority: Option<TaskPriority>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            status: status.unwrap_or(TaskStatus::Pending),
            priority: priority.unwrap_or(TaskPriority::Medium),
            created_at: monotonic_epoch_ms(),
        }
    }
}

static CREATED_AT_HIGH_WATER_MS: AtomicI64 = AtomicI64::new(0);

/// Current time in epoch milliseconds, clamped so successive calls in the
/// same process never go backwards even if the system clock does.
pub(crate) fn monotonic_epoch_ms() -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0);
    CREATED_AT_HIGH_WATER_MS
        .fetch_max(now, Ordering::SeqCst)
        .max(now)
}

#[cfg(test)]
mod tests {
    use super::{monotonic_epoch_ms, TaskPriority, TaskStatus};

    #[test]
    fn status_parse_round_trips_canonical_names() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("done"), None);
    }

    #[test]
    fn priority_parse_round_trips_canonical_names() {
        for priority in TaskPriority::ALL {
            assert_eq!(TaskPriority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(TaskPriority::parse("urgent"), None);
    }

    #[test]
    fn creation_stamps_never_decrease() {
        let mut previous = monotonic_epoch_ms();
        for _ in 0..100 {
            let next = monotonic_epoch_ms();
            assert!(next >= previous);
            previous = next;
        }
    }
}
