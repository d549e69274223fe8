//! Domain model for the labeling concept.
//!
//! # Responsibility
//! - Define the canonical data structures used by concept logic.
//!
//! # Invariants
//! - Every label is identified by a stable `LabelId`.
//! - Deletion is a hard delete; no tombstone state exists for labels.

pub mod label;
