//! Infrastructure adapters for Strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod descriptor;
pub mod filesystem;
pub mod properties;
pub mod reporter;
pub mod template_source;

// Re-export commonly used adapters
pub use descriptor::PackageXmlFile;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use properties::BuildPropertiesFile;
pub use reporter::{RecordingReporter, ReportLevel, TracingReporter};
pub use template_source::{DirectoryTemplateSource, EmbeddedTemplates};
