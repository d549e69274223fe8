//! Label domain model.
//!
//! # Responsibility
//! - Define the canonical label record shared by every concept instance.
//! - Provide construction and validation helpers for write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another label.
//! - `owner` and `item` are opaque references; core never interprets what
//!   they point at. That is the caller's responsibility.
//! - `name` is the only mutable field after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a label record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type LabelId = Uuid;

/// Opaque identifier of the user who owns a label.
pub type UserId = Uuid;

/// Opaque identifier of the entity a label points at.
///
/// Items can be other users (circles), activities (favorites, wishlist) or
/// time blocks (free, hard commitment, soft commitment). Core treats them
/// uniformly.
pub type ItemId = Uuid;

/// Canonical label record: one owner tags one item with one name.
///
/// The storage layer additionally tracks `created_at`/`updated_at` columns;
/// those are persistence metadata and intentionally not part of the domain
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Stable global ID used for rename/delete addressing.
    pub id: LabelId,
    /// User that created the label. Immutable after creation.
    pub owner: UserId,
    /// Categorical tag, e.g. "Circle friend" or "Favorite".
    pub name: String,
    /// Referenced entity. Immutable after creation.
    pub item: ItemId,
}

/// Validation failure for label write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
}

impl Display for LabelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "label name must not be empty"),
        }
    }
}

impl Error for LabelValidationError {}

impl Label {
    /// Creates a new label with a generated stable ID.
    pub fn new(owner: UserId, name: impl Into<String>, item: ItemId) -> Self {
        Self::with_id(Uuid::new_v4(), owner, name, item)
    }

    /// Creates a label with a caller-provided stable ID.
    ///
    /// Used by import paths and deterministic tests where identity already
    /// exists externally.
    pub fn with_id(id: LabelId, owner: UserId, name: impl Into<String>, item: ItemId) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            item,
        }
    }

    /// Checks the record against model invariants.
    ///
    /// Write paths must call this before any SQL mutation. Duplicate
    /// `(owner, item)` pairs are deliberately NOT rejected here; callers
    /// that need uniqueness run the concept assertion helpers first.
    pub fn validate(&self) -> Result<(), LabelValidationError> {
        if self.name.trim().is_empty() {
            return Err(LabelValidationError::EmptyName);
        }
        Ok(())
    }
}
