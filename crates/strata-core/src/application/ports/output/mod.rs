//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the outside world.
//! The `strata-adapters` crate provides implementations. Every path handed to
//! a port is absolute: the service joins component-relative paths onto the
//! component root before calling out.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{DescriptorField, FolderEntry};
use crate::error::StrataResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    fn read_file(&self, path: &Path) -> StrataResult<Vec<u8>>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &[u8]) -> StrataResult<()>;

    /// Direct children of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> StrataResult<Vec<FolderEntry>>;

    fn remove_file(&self, path: &Path) -> StrataResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StrataResult<()>;
}

/// Port for named template artifacts.
///
/// Implemented by:
/// - `strata_adapters::template_source::EmbeddedTemplates` (compiled in)
/// - `strata_adapters::template_source::DirectoryTemplateSource` (on disk)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Raw bytes of a template, or `TemplateNotFound`.
    fn fetch(&self, name: &str) -> StrataResult<Vec<u8>>;

    /// Every template name this source can serve, sorted.
    fn list(&self) -> StrataResult<Vec<String>>;
}

/// Port for the component's persisted key/value store.
///
/// Each call names the component root; the adapter decides where under it
/// the store lives.
pub trait PropertiesStore: Send + Sync {
    fn exists(&self, root: &Path) -> bool;

    /// Every entry, in file order.
    fn read_all(&self, root: &Path) -> StrataResult<Vec<(String, String)>>;

    fn read(&self, root: &Path, key: &str) -> StrataResult<Option<String>>;

    /// Set `key`, updating it in place if present, appending otherwise.
    fn write(&self, root: &Path, key: &str, value: &str) -> StrataResult<()>;

    /// Add a new entry, right after `after` when that key exists, else at the end.
    fn append(&self, root: &Path, key: &str, value: &str, after: Option<&str>)
    -> StrataResult<()>;
}

/// Port for the packaging descriptor.
#[cfg_attr(test, mockall::automock)]
pub trait PackageDescriptor: Send + Sync {
    fn set_field(&self, root: &Path, field: DescriptorField, value: &str) -> StrataResult<()>;
}

/// Line-oriented progress channel towards the user.
#[cfg_attr(test, mockall::automock)]
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);

    fn warn(&self, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}
