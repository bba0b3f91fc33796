//! Template source adapters.
//!
//! Templates are addressed by `<kind>/<file>` names, e.g.
//! `php-library/build.xml`. Two sources serve them:
//!
//! - [`EmbeddedTemplates`]: the set compiled into the binary (default).
//! - [`DirectoryTemplateSource`]: a directory on disk with the same layout,
//!   for teams that ship their own house templates.

mod directory;
mod embedded;

pub use directory::{DirectoryTemplateSource, TEMPLATES_DIR_ENV};
pub use embedded::EmbeddedTemplates;
