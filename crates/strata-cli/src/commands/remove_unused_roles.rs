//! `strata remove-unused-roles`: reclaim folders of roles nobody used.
//!
//! Sequence:
//! 1. Detect unused roles and show them
//! 2. Stop after listing on `--dry-run`
//! 3. Confirm unless `--yes`
//! 4. Remove, then report leftovers as a partial failure

use std::path::Path;

use serde::Serialize;
use tracing::{instrument, warn};

use strata_core::{
    application::{ApplicationError, RemovalOutcome},
    domain::UnusedRoleReport,
};

use crate::{
    cli::RemoveUnusedRolesArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
    service::component_service,
};

/// JSON shape of a run.
#[derive(Debug, Serialize)]
struct RemovalSummary<'a> {
    dry_run: bool,
    unused: &'a UnusedRoleReport,
    removed: Vec<String>,
    skipped: Vec<String>,
    failed: Vec<String>,
}

#[instrument(skip_all, fields(folder = %args.folder.display(), dry_run = args.dry_run))]
pub fn execute(
    args: RemoveUnusedRolesArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let service = component_service(config, output);
    let report = service.detect_unused_roles(&args.folder)?;

    if !output.is_json() && !report.is_empty() {
        output.header("Unused roles:")?;
        for (role, folders) in report.iter() {
            let names: Vec<String> = folders.iter().map(ToString::to_string).collect();
            output.field(role.as_str(), &names.join(", "))?;
        }
        output.print("")?;
    }

    let proceed = args.dry_run
        || report.is_empty()
        || args.yes
        || prompt::confirm(&format!("Remove {} role(s)?", report.len()), false)?;
    if !proceed {
        return Err(CliError::Cancelled);
    }

    let outcome = service.remove_unused_roles(&args.folder, args.dry_run)?;

    if output.is_json() {
        output.json(&summary(&report, &outcome))?;
    } else if !outcome.removed.is_empty() {
        let verb = if outcome.dry_run { "Would remove" } else { "Removed" };
        output.success(&format!(
            "{verb} {} folder(s) for {} role(s)",
            outcome.removed.len(),
            outcome.roles.len()
        ))?;
    }

    into_result(&args.folder, outcome)
}

fn summary<'a>(report: &'a UnusedRoleReport, outcome: &RemovalOutcome) -> RemovalSummary<'a> {
    RemovalSummary {
        dry_run: outcome.dry_run,
        unused: report,
        removed: outcome.removed.iter().map(ToString::to_string).collect(),
        skipped: outcome.skipped.iter().map(ToString::to_string).collect(),
        failed: outcome.failures.iter().map(ToString::to_string).collect(),
    }
}

/// Turn collected per-folder failures into the command's error.
fn into_result(folder: &Path, outcome: RemovalOutcome) -> CliResult<()> {
    if outcome.is_complete() {
        return Ok(());
    }

    let paths = outcome
        .failures
        .iter()
        .filter_map(|failure| match failure {
            ApplicationError::Removal { path, .. } => Some(path.clone()),
            _ => None,
        })
        .collect();

    warn!(folder = %folder.display(), failed = outcome.failures.len(), "Removal incomplete");
    Err(CliError::PartialRemoval {
        failed: outcome.failures.len(),
        attempted: outcome.failures.len() + outcome.removed.len(),
        paths,
    })
}
