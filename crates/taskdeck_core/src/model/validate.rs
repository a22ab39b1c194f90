//! Field validation for candidate task input.
//!
//! # Responsibility
//! - Check draft/patch input against the documented field rules.
//! - Collect every violation instead of stopping at the first.
//!
//! # Invariants
//! - Validation is pure: no side effects, no input mutation, no panics.
//! - Malformed input always yields a report, never an error.

use crate::model::task::{TaskPriority, TaskStatus};
use serde::Deserialize;
use std::fmt::{Display, Formatter};

const TITLE_MAX_CHARS: usize = 200;
const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Input shape for creating a task.
///
/// Status/priority arrive as raw strings: membership in the closed sets is a
/// validation rule and must surface as a violation, not a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl TaskDraft {
    /// Convenience constructor for the common title-only case.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial input shape for updating a task.
///
/// `id` and `created_at` are deliberately absent: they are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    /// Doubly optional: an absent field leaves the description alone, an
    /// explicit null (`Some(None)`) clears it.
    #[serde(default, deserialize_with = "nullable_field")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Maps JSON null to `Some(None)` so a patch can distinguish "clear the
/// field" from "field not mentioned" (which `serde(default)` handles).
fn nullable_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// One field rule violation, rendered for humans via `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    TitleRequired,
    TitleTooLong,
    DescriptionTooLong,
    InvalidStatus(String),
    InvalidPriority(String),
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "title is required"),
            Self::TitleTooLong => {
                write!(f, "title too long (max {TITLE_MAX_CHARS} characters)")
            }
            Self::DescriptionTooLong => {
                write!(
                    f,
                    "description too long (max {DESCRIPTION_MAX_CHARS} characters)"
                )
            }
            Self::InvalidStatus(value) => {
                write!(f, "invalid status `{value}`; must be one of: ")?;
                write_closed_set(f, TaskStatus::ALL.iter().map(|status| status.as_str()))
            }
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; must be one of: ")?;
                write_closed_set(f, TaskPriority::ALL.iter().map(|priority| priority.as_str()))
            }
        }
    }
}

fn write_closed_set<'a>(
    f: &mut Formatter<'_>,
    names: impl Iterator<Item = &'a str>,
) -> std::fmt::Result {
    for (index, name) in names.enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{name}")?;
    }
    Ok(())
}

/// Checks a create draft, returning every violation in field order.
pub fn validate_draft(draft: &TaskDraft) -> Vec<Violation> {
    let mut violations = Vec::new();

    if draft.title.is_empty() {
        violations.push(Violation::TitleRequired);
    } else if draft.title.chars().count() > TITLE_MAX_CHARS {
        violations.push(Violation::TitleTooLong);
    }

    check_common(
        draft.description.as_deref(),
        draft.status.as_deref(),
        draft.priority.as_deref(),
        &mut violations,
    );
    violations
}

/// Checks a partial update, returning every violation in field order.
///
/// A missing title is fine here; an explicitly empty one is not.
pub fn validate_patch(patch: &TaskPatch) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Some(title) = patch.title.as_deref() {
        if title.is_empty() {
            violations.push(Violation::TitleRequired);
        } else if title.chars().count() > TITLE_MAX_CHARS {
            violations.push(Violation::TitleTooLong);
        }
    }

    check_common(
        patch.description.as_ref().and_then(|field| field.as_deref()),
        patch.status.as_deref(),
        patch.priority.as_deref(),
        &mut violations,
    );
    violations
}

fn check_common(
    description: Option<&str>,
    status: Option<&str>,
    priority: Option<&str>,
    violations: &mut Vec<Violation>,
) {
    if let Some(description) = description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            violations.push(Violation::DescriptionTooLong);
        }
    }

    if let Some(status) = status {
        if TaskStatus::parse(status).is_none() {
            violations.push(Violation::InvalidStatus(status.to_string()));
        }
    }

    if let Some(priority) = priority {
        if TaskPriority::parse(priority).is_none() {
            violations.push(Violation::InvalidPriority(priority.to_string()));
        }
    }
}
