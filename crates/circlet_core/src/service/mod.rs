//! Concept services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Host the precondition assertion helpers that route-level composition
//!   code runs before cross-concept mutations.

pub mod labeling;
