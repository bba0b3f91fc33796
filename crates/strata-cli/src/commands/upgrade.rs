//! `strata upgrade`: replay layout transitions up to a target version.

use tracing::{info, instrument};

use crate::{
    cli::UpgradeArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    service::component_service,
};

#[instrument(skip_all, fields(folder = %args.folder.display()))]
pub fn execute(args: UpgradeArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = component_service(config, output);
    let target = args.to.unwrap_or_else(|| service.latest_version());

    let outcome = service.upgrade_component(&args.folder, target, args.from)?;
    info!(from = outcome.from, to = outcome.to, steps = outcome.steps.len(), "Upgrade finished");

    if output.is_json() {
        return output.json(&outcome);
    }

    if outcome.steps.is_empty() {
        return Ok(());
    }

    output.success(&format!(
        "Upgraded {} from v{} to v{} ({} step{})",
        args.folder.display(),
        outcome.from,
        outcome.to,
        outcome.steps.len(),
        if outcome.steps.len() == 1 { "" } else { "s" },
    ))?;
    Ok(())
}
