//! The contract every component kind fulfils.
//!
//! A kind is pure data: which folders each role owns, how to tell whether a
//! role is in use, which templates a fresh component receives, and the table
//! of per-version transitions. All behaviour driven by that data lives in
//! [`crate::application::ComponentService`], so a second kind is a new
//! implementation of this trait and nothing else.

use crate::domain::{
    role::Role,
    upgrade::TransitionTable,
};

/// Folders a role creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleLayout {
    /// Folders required by the role, parents first.
    pub folders: &'static [&'static str],
    /// Nested unit-test folder, created only when `test` is also selected.
    pub unit_test_folder: Option<&'static str>,
    /// Folder whose presence marks the role as active.
    pub probe: &'static str,
}

/// How to decide whether a role holds any real user content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageRule {
    /// Folders that must all be unused for the role to be reclaimable.
    pub folders: &'static [&'static str],
    /// Filenames ignored on top of the kind's universal placeholders.
    pub ignorable: &'static [&'static str],
    /// Name of this role's folder under the test tree. Once the role is found
    /// unused, the name becomes ignorable when judging the `test` role.
    pub test_subfolder: Option<&'static str>,
    /// Parent folder removed along with `folders` (the `test` container).
    pub container: Option<&'static str>,
}

/// One template copied into a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateInstall {
    /// Logical template name in the template source.
    pub template: &'static str,
    /// Component-relative destination.
    pub destination: &'static str,
    /// Only installed when this role is active.
    pub requires: Option<Role>,
}

impl TemplateInstall {
    pub const fn new(template: &'static str, destination: &'static str) -> Self {
        Self {
            template,
            destination,
            requires: None,
        }
    }

    pub const fn for_role(role: Role, template: &'static str, destination: &'static str) -> Self {
        Self {
            template,
            destination,
            requires: Some(role),
        }
    }
}

/// A labelled group of installs run by `create_component`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionStep {
    pub label: &'static str,
    pub installs: Vec<TemplateInstall>,
}

/// Static knowledge about one kind of component.
pub trait ComponentKind: Send + Sync {
    /// Value stored under the type key of the properties store.
    fn component_type(&self) -> &'static str;

    /// Newest layout generation this kind can produce.
    fn latest_version(&self) -> u32;

    fn layout(&self, role: Role) -> RoleLayout;

    fn usage_rule(&self, role: Role) -> UsageRule;

    /// Filenames that never count as user content.
    fn placeholder_files(&self) -> &'static [&'static str];

    /// Sentinel dropped into every created folder.
    fn sentinel_file(&self) -> &'static str;

    /// Top-level artifacts that betray a component of *some* kind.
    fn canonical_markers(&self) -> &'static [&'static str];

    /// Installers run by `create_component`, in order.
    fn provisioning_steps(&self) -> Vec<ProvisionStep>;

    /// Per-version upgrade transitions.
    fn transitions(&self) -> TransitionTable;
}
