//! Labeling concept service.
//!
//! # Responsibility
//! - Manage the lifetime of label records through a repository handle.
//! - Provide precondition assertions callers run before mutating related
//!   concepts.
//!
//! # Invariants
//! - The service never enforces `(owner, item)` uniqueness on its own;
//!   callers that need it run `assert_not_already_labeled` first. The check
//!   is not atomic with the following insert.
//! - Storage failures propagate unchanged; nothing is retried here.

use crate::model::label::{ItemId, Label, LabelId, UserId};
use crate::repo::label_repo::{LabelListQuery, LabelRepository, RepoError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Public classification of labeling failures, used by route-level callers
/// to pick an HTTP response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelingErrorKind {
    /// A referenced record does not exist.
    NotFound,
    /// The operation violates a domain precondition.
    NotAllowed,
    /// Storage-layer failure or internal inconsistency.
    Internal,
}

/// Service error for labeling use-cases.
#[derive(Debug)]
pub enum LabelingError {
    /// No label exists under the given id.
    LabelNotFound(LabelId),
    /// The label exists but belongs to a different user.
    OwnershipMismatch { user: UserId, label: LabelId },
    /// The `(owner, item)` pair already carries at least one label.
    AlreadyLabeled(ItemId),
    /// The `(owner, item)` pair carries no label.
    NotLabeled(ItemId),
    /// The candidate name appears in the forbidden list.
    ForbiddenName(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl LabelingError {
    /// Maps each variant onto the public error taxonomy.
    pub fn kind(&self) -> LabelingErrorKind {
        match self {
            Self::LabelNotFound(_) => LabelingErrorKind::NotFound,
            Self::OwnershipMismatch { .. }
            | Self::AlreadyLabeled(_)
            | Self::NotLabeled(_)
            | Self::ForbiddenName(_)
            | Self::Repo(RepoError::Validation(_)) => LabelingErrorKind::NotAllowed,
            Self::Repo(_) | Self::InconsistentState(_) => LabelingErrorKind::Internal,
        }
    }
}

impl Display for LabelingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LabelNotFound(id) => write!(f, "label {id} does not exist"),
            Self::OwnershipMismatch { user, label } => {
                write!(f, "{user} is not the owner of label {label}")
            }
            Self::AlreadyLabeled(item) => {
                write!(f, "item {item} is already labeled; remove the label to proceed")
            }
            Self::NotLabeled(item) => write!(f, "item {item} has no label"),
            Self::ForbiddenName(name) => write!(f, "name `{name}` is forbidden"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent label state: {details}"),
        }
    }
}

impl Error for LabelingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for LabelingError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::LabelNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Labeling concept facade over a repository implementation.
///
/// One service instance corresponds to one concept namespace (circles,
/// favorites, time blocks, ...); the namespace lives on the repository
/// handle.
pub struct LabelingService<R: LabelRepository> {
    repo: R,
}

impl<R: LabelRepository> LabelingService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one label and returns the persisted record.
    ///
    /// No uniqueness is enforced; callers that need a unique `(owner, item)`
    /// pair run `assert_not_already_labeled` immediately before this call.
    pub fn add_label(
        &self,
        owner: UserId,
        name: impl Into<String>,
        item: ItemId,
    ) -> Result<Label, LabelingError> {
        let label = Label::new(owner, name, item);
        let id = self.repo.create_label(&label)?;
        self.repo
            .get_label(id)?
            .ok_or(LabelingError::InconsistentState(
                "created label not found in read-back",
            ))
    }

    /// Renames the label identified by `id`.
    ///
    /// A missing id is a silent no-op; callers that care about existence
    /// check it first (e.g. via `assert_owner_is_user`).
    pub fn change_label(&self, id: LabelId, name: &str) -> Result<(), LabelingError> {
        self.repo.rename_label(id, name)?;
        Ok(())
    }

    /// Removes the label identified by `id`. A missing id is a silent no-op.
    pub fn delete_label(&self, id: LabelId) -> Result<(), LabelingError> {
        self.repo.delete_label(id)?;
        Ok(())
    }

    /// Returns every label `owner` created under the exact `name`.
    pub fn get_all_items_with_label(
        &self,
        owner: UserId,
        name: impl Into<String>,
    ) -> Result<Vec<Label>, LabelingError> {
        let labels = self.repo.list_labels(&LabelListQuery::by_name(owner, name))?;
        Ok(labels)
    }

    /// Returns every label `owner` placed on `item`.
    pub fn get_labels_on_item(
        &self,
        owner: UserId,
        item: ItemId,
    ) -> Result<Vec<Label>, LabelingError> {
        let labels = self.repo.list_labels(&LabelListQuery::by_item(owner, item))?;
        Ok(labels)
    }

    /// Fails with `LabelNotFound` when `id` is absent, with
    /// `OwnershipMismatch` when the record belongs to someone else.
    pub fn assert_owner_is_user(&self, id: LabelId, user: UserId) -> Result<(), LabelingError> {
        let label = self
            .repo
            .get_label(id)?
            .ok_or(LabelingError::LabelNotFound(id))?;

        if label.owner != user {
            return Err(LabelingError::OwnershipMismatch { user, label: id });
        }

        Ok(())
    }

    /// Fails with `AlreadyLabeled` when `(owner, item)` carries any label.
    pub fn assert_not_already_labeled(
        &self,
        owner: UserId,
        item: ItemId,
    ) -> Result<(), LabelingError> {
        if !self.get_labels_on_item(owner, item)?.is_empty() {
            return Err(LabelingError::AlreadyLabeled(item));
        }
        Ok(())
    }

    /// Fails with `NotLabeled` when `(owner, item)` carries no label.
    pub fn assert_already_labeled(
        &self,
        owner: UserId,
        item: ItemId,
    ) -> Result<(), LabelingError> {
        if self.get_labels_on_item(owner, item)?.is_empty() {
            return Err(LabelingError::NotLabeled(item));
        }
        Ok(())
    }

    /// Fails with `ForbiddenName` when `name` matches an entry of
    /// `forbidden` after normalization on both sides.
    ///
    /// Comparison is explicit value membership, insensitive to case and
    /// inner whitespace runs. Stored names are never normalized.
    pub fn assert_good_name(&self, name: &str, forbidden: &[String]) -> Result<(), LabelingError> {
        let candidate = normalize_name(name);
        if forbidden
            .iter()
            .any(|entry| normalize_name(entry) == candidate)
        {
            return Err(LabelingError::ForbiddenName(name.to_string()));
        }
        Ok(())
    }
}

/// Normalizes a label name for comparison purposes.
///
/// Rules: trim, collapse inner whitespace runs to a single space, lowercase.
pub fn normalize_name(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(name.trim(), " ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize_name;

    #[test]
    fn normalize_name_collapses_whitespace_and_lowercases() {
        assert_eq!(normalize_name("  Circle   Friend "), "circle friend");
        assert_eq!(normalize_name("favorite"), "favorite");
    }

    #[test]
    fn normalize_name_keeps_empty_empty() {
        assert_eq!(normalize_name("   "), "");
    }
}
