//! `strata add-roles`: extend an existing component.

use tracing::instrument;

use crate::{
    cli::{AddRolesArgs, role_set},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    service::component_service,
};

#[instrument(skip_all, fields(folder = %args.folder.display()))]
pub fn execute(args: AddRolesArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = component_service(config, output);
    let requested = role_set(&args.roles);

    let before = service.active_roles(&args.folder);
    let active = service.add_roles(&args.folder, &requested)?;

    if output.is_json() {
        return output.json(&service.status(&args.folder)?);
    }

    let added = active.difference(&before);
    if added.is_empty() {
        output.info("All requested roles were already active")?;
    } else {
        output.success(&format!("Added roles: {added}"))?;
    }
    output.field("Active roles", &active.to_string())?;
    Ok(())
}
