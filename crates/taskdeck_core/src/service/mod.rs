//! Task use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, defaults, and persistence into CRUD entry
//!   points.
//! - Keep external layers (HTTP, CLI) decoupled from storage details.

pub mod task_service;
