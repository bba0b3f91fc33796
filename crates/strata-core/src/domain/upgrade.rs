//! Declarative upgrade transitions.
//!
//! Every generation step is data: an ordered list of [`UpgradeAction`]s
//! registered under the version it upgrades *from*. The table is built by
//! appending steps, so a new generation is one more `.step(..)` call and no
//! earlier entry is ever edited.

use std::fmt;

use crate::domain::{error::DomainError, kind::TemplateInstall, role::Role};

/// A field of the packaging descriptor an upgrade may rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorField {
    /// `<version><release>`.
    ReleaseVersion,
    /// `<stability><release>`.
    ReleaseStability,
}

impl DescriptorField {
    /// Parent element and child element names.
    pub const fn element_path(&self) -> (&'static str, &'static str) {
        match self {
            Self::ReleaseVersion => ("version", "release"),
            Self::ReleaseStability => ("stability", "release"),
        }
    }
}

impl fmt::Display for DescriptorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (parent, child) = self.element_path();
        write!(f, "{parent}/{child}")
    }
}

/// One thing a transition does to a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeAction {
    /// Overwrite an engine-owned file with its current template.
    InstallTemplate(TemplateInstall),
    /// Add a persisted property unless it is already present.
    AddProperty {
        key: &'static str,
        value: &'static str,
        after: Option<&'static str>,
    },
    /// Re-create the folders of every active role.
    EnsureRoleFolders,
    /// Create a folder introduced by this generation.
    CreateFolder(&'static str),
    /// Literal substitutions in a text file.
    Substitute {
        file: &'static str,
        replacements: &'static [(&'static str, &'static str)],
    },
    /// Replace a possibly user-edited file.
    ///
    /// If `file` is byte-identical to `previous_template`, it is removed and
    /// `install` takes its place. Otherwise it is left alone and `install` is
    /// written next to it.
    RenameOrReplace {
        file: &'static str,
        previous_template: &'static str,
        install: TemplateInstall,
    },
    /// Rewrite one field of the packaging descriptor.
    EditDescriptor {
        field: DescriptorField,
        value: &'static str,
    },
}

impl UpgradeAction {
    /// Role that must be active for this action to run.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::InstallTemplate(install) | Self::RenameOrReplace { install, .. } => {
                install.requires
            }
            _ => None,
        }
    }
}

/// The step from `from` to `from + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTransition {
    pub from: u32,
    pub summary: &'static str,
    pub actions: Vec<UpgradeAction>,
}

impl VersionTransition {
    pub const fn to(&self) -> u32 {
        self.from + 1
    }
}

/// Contiguous, ascending table of transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    first: u32,
    steps: Vec<VersionTransition>,
}

impl TransitionTable {
    /// Start a table whose first step upgrades from `first`.
    pub fn starting_at(first: u32) -> Self {
        Self {
            first,
            steps: Vec::new(),
        }
    }

    /// Append the next step.
    pub fn step(mut self, summary: &'static str, actions: Vec<UpgradeAction>) -> Self {
        let from = self.first + self.steps.len() as u32;
        self.steps.push(VersionTransition {
            from,
            summary,
            actions,
        });
        self
    }

    /// Oldest version the table can upgrade from.
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Version reached after the last step.
    pub fn latest(&self) -> u32 {
        self.first + self.steps.len() as u32
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps that take a component from `from` to `to`, in order.
    pub fn plan(&self, from: u32, to: u32) -> Result<&[VersionTransition], DomainError> {
        if from < self.first {
            return Err(DomainError::MissingTransition { from });
        }
        if to > self.latest() {
            return Err(DomainError::InvalidVersion {
                version: to,
                reason: format!("latest known version is {}", self.latest()),
            });
        }
        if to < from {
            return Err(DomainError::InvalidVersion {
                version: to,
                reason: format!("cannot downgrade from version {from}"),
            });
        }

        let start = (from - self.first) as usize;
        let end = (to - self.first) as usize;
        Ok(&self.steps[start..end])
    }
}
