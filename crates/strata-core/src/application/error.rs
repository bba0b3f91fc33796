//! Application layer errors.
//!
//! These errors represent failures while acting on a component directory.
//! Validation failures that happen before any side effect are `DomainError`s
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The directory holds something this kind cannot work with.
    #[error("Incompatible layout at {path}: {reason}")]
    IncompatibleLayout { path: PathBuf, reason: String },

    /// The directory holds no component at all.
    #[error("No component found at {path}")]
    NotAComponent { path: PathBuf },

    /// `create_component` was asked to provision over an existing component.
    #[error("A component already exists at {path}")]
    ComponentExists { path: PathBuf },

    #[error("Component at {path} is already at version {version}")]
    AlreadyUpToDate { path: PathBuf, version: u32 },

    /// A required folder could not be created.
    #[error("Cannot create folder {path}: {reason}")]
    FolderCreation { path: PathBuf, reason: String },

    /// A folder could not be removed.
    #[error("Cannot remove {path}: {reason}")]
    Removal { path: PathBuf, reason: String },

    /// Any other filesystem failure.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// The properties store could not be read or written.
    #[error("Properties error at {path}: {reason}")]
    Properties { path: PathBuf, reason: String },

    /// The packaging descriptor could not be edited.
    #[error("Descriptor error at {path}: {reason}")]
    Descriptor { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::IncompatibleLayout { path, reason } => vec![
                format!("{} was not created by this tool, or by a newer version of it", path.display()),
                format!("Details: {}", reason),
            ],
            Self::NotAComponent { path } => vec![
                format!("Nothing to work on in {}", path.display()),
                "Create a component first: strata init <folder> --roles php,test".into(),
            ],
            Self::ComponentExists { path } => vec![
                format!("{} already holds a component", path.display()),
                "Use: strata add-roles to extend it".into(),
                "Or: strata upgrade to bring it up to date".into(),
            ],
            Self::AlreadyUpToDate { .. } => vec![
                "Nothing to upgrade".into(),
                "Use --from <version> to replay steps from an older version".into(),
            ],
            Self::FolderCreation { path, .. } | Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check that no file is in the way of a folder".into(),
            ],
            Self::Removal { path, .. } => vec![
                format!("Failed to remove: {}", path.display()),
                "Check permissions and remove the folder manually".into(),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("No template named '{}'", name),
                "Run: strata templates to list available templates".into(),
                "Check STRATA_TEMPLATES_DIR or templates.local_path".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IncompatibleLayout { .. } => ErrorCategory::Compatibility,
            Self::NotAComponent { .. } | Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ComponentExists { .. } | Self::AlreadyUpToDate { .. } => {
                ErrorCategory::Validation
            }
            Self::FolderCreation { .. }
            | Self::Removal { .. }
            | Self::Filesystem { .. }
            | Self::Properties { .. }
            | Self::Descriptor { .. } => ErrorCategory::Internal,
        }
    }
}
