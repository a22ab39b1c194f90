//! Core domain logic for taskdeck.
//! This crate is the single source of truth for task business invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskPriority, TaskStatus};
pub use model::validate::{validate_draft, validate_patch, TaskDraft, TaskPatch, Violation};
pub use service::task_service::{ListFilter, ServiceError, ServiceResult, TaskService};
pub use store::{JsonFileBackend, StoreError, StoreResult, TaskBackend};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
