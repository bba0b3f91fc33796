//! Application layer for Strata.
//!
//! This layer contains:
//! - **Services**: `ComponentService`, the use cases over one component directory
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer drives the domain layer through the ports. Rules
//! about roles, generations and usage live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ComponentService, ComponentStatus, RemovalOutcome, UpgradeOutcome};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, PackageDescriptor, PropertiesStore, Reporter, TemplateSource};

pub use error::ApplicationError;
