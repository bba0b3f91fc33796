//! Core domain layer for Strata.
//!
//! Pure knowledge about component kinds and the rules that act on it. Every
//! filesystem question is asked through the application layer's ports; the
//! functions here only see paths, markers and folder listings.
//!
//! ## Layout
//!
//! - [`role`]: the closed role enumeration and role sets
//! - [`kind`]: the [`ComponentKind`] contract, [`kinds`] holds the shipped kinds
//! - [`registry`]: role selection → folder list
//! - [`state`]: marker → [`ComponentState`]
//! - [`upgrade`]: declarative transition table
//! - [`usage`]: unused-role detection

pub mod common;
pub mod error;
pub mod fingerprint;
pub mod kind;
pub mod kinds;
pub mod registry;
pub mod role;
pub mod state;
pub mod upgrade;
pub mod usage;

mod validation;

pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory};
pub use fingerprint::Fingerprint;
pub use kind::{ComponentKind, ProvisionStep, RoleLayout, TemplateInstall, UsageRule};
pub use kinds::PhpLibrary;
pub use registry::RoleRegistry;
pub use role::{Role, RoleSet};
pub use state::{classify, Classification, ComponentState, VersionMarker};
pub use upgrade::{DescriptorField, TransitionTable, UpgradeAction, VersionTransition};
pub use usage::{detect_unused_roles, FolderEntry, UnusedRoleReport};
pub use validation::DomainValidator;
