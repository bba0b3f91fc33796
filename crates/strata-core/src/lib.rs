//! Strata Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Strata, a
//! provisioning and migration engine for versioned component layouts,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            strata-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (ComponentService)            │
//! │  provision / upgrade / reclaim roles    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Filesystem, TemplateSource, Props,    │
//! │   PackageDescriptor, Reporter)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     strata-adapters (Infrastructure)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Role, ComponentKind, TransitionTable, │
//! │   usage detection)                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strata_core::{
//!     application::ComponentService,
//!     domain::{PhpLibrary, Role, RoleSet},
//! };
//!
//! let service = ComponentService::new(
//!     Box::new(PhpLibrary),
//!     filesystem, templates, properties, descriptor, reporter,
//! );
//! service.create_component(root, &RoleSet::from([Role::Php, Role::Test]))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ComponentService, ComponentStatus, RemovalOutcome, UpgradeOutcome,
        ports::{Filesystem, PackageDescriptor, PropertiesStore, Reporter, TemplateSource},
    };
    pub use crate::domain::{
        ComponentKind, ComponentState, DescriptorField, FolderEntry, PhpLibrary, RelativePath,
        Role, RoleSet, UnusedRoleReport,
    };
    pub use crate::error::{StrataError, StrataResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
