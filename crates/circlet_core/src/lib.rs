//! Core domain logic for circlet.
//!
//! Each concept is an independent module owning one logical collection of
//! records plus the operations and precondition assertions over it; request
//! routing composes concepts one layer above this crate.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::label::{ItemId, Label, LabelId, LabelValidationError, UserId};
pub use repo::label_repo::{
    LabelListQuery, LabelRepository, RepoError, RepoResult, SqliteLabelRepository,
};
pub use service::labeling::{
    normalize_name, LabelingError, LabelingErrorKind, LabelingService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
