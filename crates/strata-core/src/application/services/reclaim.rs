use std::path::Path;

use tracing::{info, instrument, warn};

use super::component_service::ComponentService;
use crate::{
    application::ApplicationError,
    domain::{RelativePath, Role, UnusedRoleReport, detect_unused_roles},
    error::{StrataError, StrataResult},
};

/// Result of [`ComponentService::remove_unused_roles`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemovalOutcome {
    pub dry_run: bool,
    /// Roles found unused.
    pub roles: Vec<Role>,
    /// Folders removed, or that would be removed on a dry run.
    pub removed: Vec<RelativePath>,
    /// Folders already gone when their turn came.
    pub skipped: Vec<RelativePath>,
    /// One [`ApplicationError::Removal`] per folder that could not be removed.
    pub failures: Vec<ApplicationError>,
}

impl RemovalOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl ComponentService {
    /// Roles of the component at `root` that hold no real content.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn detect_unused_roles(&self, root: &Path) -> StrataResult<UnusedRoleReport> {
        self.require_managed(root)?;

        let report = detect_unused_roles::<_, StrataError>(self.kind.as_ref(), |folder| {
            let path = folder.under(root);
            if !self.filesystem.is_dir(&path) {
                return Ok(None);
            }
            self.filesystem.read_dir(&path).map(Some)
        })?;

        info!(unused = report.len(), "Usage scan complete");
        Ok(report)
    }

    /// Delete the folders of every unused role.
    ///
    /// On a dry run nothing is touched and every folder that would go is
    /// reported. A folder that fails to go is recorded in the outcome and
    /// the rest still proceed.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn remove_unused_roles(&self, root: &Path, dry_run: bool) -> StrataResult<RemovalOutcome> {
        let report = self.detect_unused_roles(root)?;

        let mut outcome = RemovalOutcome {
            dry_run,
            ..RemovalOutcome::default()
        };

        if report.is_empty() {
            self.reporter.info("No unused roles found, nothing to do");
            return Ok(outcome);
        }

        for (role, folders) in report.iter() {
            outcome.roles.push(role);
            self.reporter.info(&format!(
                "{} role '{role}'",
                if dry_run { "Would remove" } else { "Removing" }
            ));

            for folder in folders {
                let path = folder.under(root);

                if !self.filesystem.exists(&path) {
                    outcome.skipped.push(folder.clone());
                    continue;
                }

                if dry_run {
                    self.reporter.info(&format!("  would remove {folder}"));
                    outcome.removed.push(folder.clone());
                    continue;
                }

                match self.filesystem.remove_dir_all(&path) {
                    Ok(()) => {
                        info!(%role, folder = %folder, "Folder removed");
                        self.reporter.info(&format!("  removed {folder}"));
                        outcome.removed.push(folder.clone());
                    }
                    Err(e) => {
                        warn!(folder = %folder, error = %e, "Removal failed");
                        self.reporter
                            .warn(&format!("  failed to remove {folder}: {e}"));
                        outcome.failures.push(ApplicationError::Removal {
                            path,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            removed = outcome.removed.len(),
            failed = outcome.failures.len(),
            dry_run,
            "Role removal complete"
        );
        Ok(outcome)
    }
}
