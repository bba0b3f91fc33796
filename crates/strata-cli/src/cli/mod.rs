//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use strata_core::domain::{Role, RoleSet};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Provision and migrate versioned component layouts",
    long_about = "Strata creates php-library components with the folders their roles \
                  need, upgrades older layouts one generation at a time, and reclaims \
                  role folders that were never used.",
    after_help = "EXAMPLES:\n\
        \x20 strata init my-lib --roles php,test\n\
        \x20 strata status my-lib\n\
        \x20 strata upgrade my-lib\n\
        \x20 strata remove-unused-roles my-lib --dry-run",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new component.
    #[command(
        visible_alias = "new",
        about = "Create a new component",
        after_help = "EXAMPLES:\n\
            \x20 strata init my-lib                      # roles from config (default: php,test)\n\
            \x20 strata init my-lib --roles php,test,bin\n\
            \x20 strata init . --roles www"
    )]
    Init(InitArgs),

    /// Add roles to an existing component.
    #[command(
        about = "Add roles to a component",
        after_help = "EXAMPLES:\n\
            \x20 strata add-roles my-lib --roles test\n\
            \x20 strata add-roles . --roles bin,data"
    )]
    AddRoles(AddRolesArgs),

    /// Show layout state, version and active roles.
    #[command(
        visible_alias = "st",
        about = "Show component status",
        after_help = "EXAMPLES:\n\
            \x20 strata status\n\
            \x20 strata status my-lib --output-format json"
    )]
    Status(FolderArgs),

    /// Upgrade a component to a newer layout generation.
    #[command(
        about = "Upgrade a component layout",
        after_help = "EXAMPLES:\n\
            \x20 strata upgrade my-lib\n\
            \x20 strata upgrade my-lib --to 10\n\
            \x20 strata upgrade my-lib --from 9   # replay from v9 whatever is recorded"
    )]
    Upgrade(UpgradeArgs),

    /// Remove folders of roles that hold no real content.
    #[command(
        about = "Remove unused role folders",
        after_help = "EXAMPLES:\n\
            \x20 strata remove-unused-roles my-lib --dry-run\n\
            \x20 strata remove-unused-roles my-lib --yes"
    )]
    RemoveUnusedRoles(RemoveUnusedRolesArgs),

    /// List the templates the engine installs from.
    #[command(visible_alias = "ls", about = "List available templates")]
    Templates,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Strata configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 strata config init\n\
            \x20 strata config get defaults.roles\n\
            \x20 strata config set defaults.roles php,test,bin\n\
            \x20 strata config list"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// A component folder, defaulting to the current directory.
#[derive(Debug, Args)]
pub struct FolderArgs {
    #[arg(value_name = "FOLDER", default_value = ".", help = "Component folder")]
    pub folder: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Folder to create the component in; created if missing.
    #[arg(value_name = "FOLDER", default_value = ".", help = "Component folder")]
    pub folder: PathBuf,

    /// Roles to provision.  Falls back to `defaults.roles` from the config.
    #[arg(
        short = 'r',
        long = "roles",
        value_name = "ROLES",
        value_enum,
        value_delimiter = ',',
        help = "Comma-separated roles (bin, data, doc, php, test, www)"
    )]
    pub roles: Vec<RoleArg>,
}

// ── add-roles ─────────────────────────────────────────────────────────────────

/// Arguments for `strata add-roles`.
#[derive(Debug, Args)]
pub struct AddRolesArgs {
    #[arg(value_name = "FOLDER", default_value = ".", help = "Component folder")]
    pub folder: PathBuf,

    #[arg(
        short = 'r',
        long = "roles",
        value_name = "ROLES",
        value_enum,
        value_delimiter = ',',
        required = true,
        help = "Comma-separated roles to add"
    )]
    pub roles: Vec<RoleArg>,
}

// ── upgrade ───────────────────────────────────────────────────────────────────

/// Arguments for `strata upgrade`.
#[derive(Debug, Args)]
pub struct UpgradeArgs {
    #[arg(value_name = "FOLDER", default_value = ".", help = "Component folder")]
    pub folder: PathBuf,

    /// Replay from this version instead of the recorded one.
    #[arg(long = "from", value_name = "VERSION", help = "Override the starting version")]
    pub from: Option<u32>,

    /// Stop at this version.  Defaults to the latest.
    #[arg(long = "to", value_name = "VERSION", help = "Target version (default: latest)")]
    pub to: Option<u32>,
}

// ── remove-unused-roles ───────────────────────────────────────────────────────

/// Arguments for `strata remove-unused-roles`.
#[derive(Debug, Args)]
pub struct RemoveUnusedRolesArgs {
    #[arg(value_name = "FOLDER", default_value = ".", help = "Component folder")]
    pub folder: PathBuf,

    /// List what would be removed without deleting anything.
    #[arg(long = "dry-run", help = "Show what would be removed without removing")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Remove without asking")]
    pub yes: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `strata completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `strata config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.roles`.
        key: String,
    },
    /// Set a configuration key in the configuration file.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.  Lists are comma-separated.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Role names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum RoleArg {
    Bin,
    Data,
    /// Also accepted as `docs`.
    #[value(alias = "docs")]
    Doc,
    Php,
    /// Also accepted as `tests`.
    #[value(alias = "tests")]
    Test,
    Www,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Bin => Role::Bin,
            RoleArg::Data => Role::Data,
            RoleArg::Doc => Role::Doc,
            RoleArg::Php => Role::Php,
            RoleArg::Test => Role::Test,
            RoleArg::Www => Role::Www,
        }
    }
}

/// Collect parsed role arguments into a core [`RoleSet`].
pub fn role_set(args: &[RoleArg]) -> RoleSet {
    args.iter().copied().map(Role::from).collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────
