// ============================================================================
// domain/error.rs - VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Domain errors are raised before any side effect happens. They are:
/// - Cloneable (carried inside per-folder reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("at least one role must be given")]
    EmptyRoleSet,

    #[error("unknown role '{name}'")]
    UnknownRole { name: String },

    #[error("invalid version {version}: {reason}")]
    InvalidVersion { version: u32, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("no upgrade step registered from version {from}")]
    MissingTransition { from: u32 },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyRoleSet => vec![
                "Pass one or more roles, e.g. --roles php,test".into(),
                "Available roles: bin, data, doc, php, test, www".into(),
            ],
            Self::UnknownRole { name } => vec![
                format!("'{}' is not a known role", name),
                "Available roles: bin, data, doc, php, test, www".into(),
            ],
            Self::InvalidVersion { reason, .. } => vec![
                format!("Details: {}", reason),
                "Run: strata status <folder> to see the recorded version".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyRoleSet
            | Self::UnknownRole { .. }
            | Self::InvalidVersion { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::MissingTransition { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
