//! Domain model for managed tasks.
//!
//! # Responsibility
//! - Define the canonical task record and its closed value sets.
//! - Define the draft/patch input shapes consumed by validation.
//!
//! # Invariants
//! - `TaskId` is stable and never reused for another task.
//! - `status` and `priority` only ever hold values from their closed sets.
//! - `created_at` is stamped once and never mutated afterwards.

pub mod task;
pub mod validate;
