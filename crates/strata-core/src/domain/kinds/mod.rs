//! Shipped component kinds.

mod php_library;

pub use php_library::{templates as php_library_templates, PhpLibrary};
