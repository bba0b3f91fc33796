//! One module per subcommand.
//!
//! Handlers translate parsed arguments into core calls and render the
//! result. No business logic lives here.

pub mod add_roles;
pub mod completions;
pub mod config;
pub mod init;
pub mod remove_unused_roles;
pub mod status;
pub mod templates;
pub mod upgrade;
