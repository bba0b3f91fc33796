use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::component_service::{ComponentService, VERSION_KEY};
use crate::{
    application::ApplicationError,
    domain::{
        ComponentState, DomainValidator as validator, Fingerprint, RelativePath, RoleSet,
        UpgradeAction,
    },
    error::{StrataError, StrataResult},
};

/// What an upgrade run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeOutcome {
    pub from: u32,
    pub to: u32,
    /// Summaries of the steps applied, oldest first.
    pub steps: Vec<String>,
}

impl ComponentService {
    /// Replay transitions from the recorded version (or `from_override`) up
    /// to `target`.
    ///
    /// The version marker is written after each completed step, so an
    /// interrupted run resumes from the last step that finished.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn upgrade_component(
        &self,
        root: &Path,
        target: u32,
        from_override: Option<u32>,
    ) -> StrataResult<UpgradeOutcome> {
        let classification = self.require_managed(root)?;
        let recorded = classification
            .recorded_version
            .ok_or_else(|| StrataError::Internal {
                message: "managed component without a recorded version".into(),
            })?;

        if classification.state == ComponentState::UpToDate && from_override.is_none() {
            return Err(ApplicationError::AlreadyUpToDate {
                path: root.to_path_buf(),
                version: recorded,
            }
            .into());
        }

        let start = from_override.unwrap_or(recorded);
        validator::validate_versions(start, from_override, target, self.kind.latest_version())?;

        let mut outcome = UpgradeOutcome {
            from: start,
            to: start,
            steps: Vec::new(),
        };

        if start == target {
            self.reporter
                .info(&format!("Already at version {target}, nothing to do"));
            return Ok(outcome);
        }

        let table = self.kind.transitions();
        for step in table.plan(start, target)? {
            self.reporter.info(&format!(
                "Upgrading from v{} to v{}: {}",
                step.from,
                step.to(),
                step.summary
            ));

            let active = self.active_roles(root);
            for action in &step.actions {
                self.apply(root, action, &active)?;
            }

            self.properties
                .write(root, VERSION_KEY, &step.to().to_string())?;
            outcome.to = step.to();
            outcome.steps.push(step.summary.to_string());
            info!(version = step.to(), "Step complete");
        }

        Ok(outcome)
    }

    fn apply(&self, root: &Path, action: &UpgradeAction, active: &RoleSet) -> StrataResult<()> {
        match action {
            UpgradeAction::InstallTemplate(install) => {
                self.install(root, install, active)?;
            }
            UpgradeAction::AddProperty { key, value, after } => {
                if self.properties.read(root, key)?.is_some() {
                    debug!(key, "Property already set");
                } else {
                    self.properties.append(root, key, value, *after)?;
                    self.reporter.info(&format!("Added property {key}"));
                }
            }
            UpgradeAction::EnsureRoleFolders => {
                for folder in self.registry().resolve(active) {
                    self.ensure_folder(root, &folder)?;
                }
            }
            UpgradeAction::CreateFolder(folder) => {
                self.ensure_folder(root, &RelativePath::try_new(*folder)?)?;
            }
            UpgradeAction::Substitute { file, replacements } => {
                self.substitute(root, file, replacements)?;
            }
            UpgradeAction::RenameOrReplace {
                file,
                previous_template,
                install,
            } => {
                if install.requires.is_some_and(|role| !active.contains(role)) {
                    return Ok(());
                }
                self.retire_if_pristine(root, file, previous_template, install.destination)?;
                self.install(root, install, active)?;
            }
            UpgradeAction::EditDescriptor { field, value } => {
                self.descriptor.set_field(root, *field, value)?;
                debug!(%field, value, "Descriptor updated");
            }
        }
        Ok(())
    }

    fn substitute(
        &self,
        root: &Path,
        file: &str,
        replacements: &[(&str, &str)],
    ) -> StrataResult<()> {
        let path = RelativePath::try_new(file)?.under(root);
        if !self.filesystem.is_file(&path) {
            warn!(file, "Substitution target missing");
            self.reporter
                .warn(&format!("{file} not found, skipping substitutions"));
            return Ok(());
        }

        let original = String::from_utf8(self.filesystem.read_file(&path)?).map_err(|e| {
            ApplicationError::Filesystem {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        let updated = replacements
            .iter()
            .fold(original.clone(), |text, (from, to)| text.replace(from, to));

        if updated != original {
            self.filesystem.write_file(&path, updated.as_bytes())?;
            debug!(file, "Substitutions applied");
        }
        Ok(())
    }

    /// Remove `file` if it is byte-identical to `previous_template`.
    ///
    /// A modified copy is left alone and the user is told where the new file
    /// went instead.
    fn retire_if_pristine(
        &self,
        root: &Path,
        file: &str,
        previous_template: &str,
        replacement: &str,
    ) -> StrataResult<()> {
        let path = RelativePath::try_new(file)?.under(root);
        if !self.filesystem.is_file(&path) {
            return Ok(());
        }

        let current = Fingerprint::of(&self.filesystem.read_file(&path)?);
        let pristine = Fingerprint::of(&self.templates.fetch(previous_template)?);

        if current == pristine {
            self.filesystem.remove_file(&path)?;
            self.reporter
                .info(&format!("Replaced {file} with {replacement}"));
        } else {
            debug!(%current, %pristine, "Fingerprints differ");
            self.reporter.warn(&format!(
                "{file} has local changes and was kept; compare it with the new {replacement}"
            ));
        }
        Ok(())
    }
}
