//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the document-collection style data access contract for labels.
//! - Isolate SQLite query details from concept orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Label::validate()` before persistence.
//! - Every repository handle is scoped to one instance namespace; rows from
//!   other namespaces are invisible through it.

pub mod label_repo;
