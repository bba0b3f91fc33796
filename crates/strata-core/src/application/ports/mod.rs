//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `strata-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: file and folder operations
//!   - `TemplateSource`: named template artifacts
//!   - `PropertiesStore`: persisted version marker and build properties
//!   - `PackageDescriptor`: packaging descriptor edits
//!   - `Reporter`: progress lines for the user
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by `ComponentService`)

pub mod output;

pub use output::{Filesystem, PackageDescriptor, PropertiesStore, Reporter, TemplateSource};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackageDescriptor, MockReporter, MockTemplateSource};
