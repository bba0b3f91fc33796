//! `strata status`: classify a folder and show what is active.

use strata_core::{application::ComponentStatus, domain::ComponentState};

use crate::{
    cli::FolderArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    service::component_service,
};

pub fn execute(args: FolderArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = component_service(config, output);
    let status = service.status(&args.folder)?;

    if output.is_json() {
        return output.json(&status);
    }

    output.header(&format!("{}", args.folder.display()))?;
    output.field("Kind", status.component_type)?;
    output.field("State", &status.state.to_string())?;
    output.field("Version", &version_line(&status))?;
    output.field("Active roles", &roles_line(&status))?;
    if let Some(reason) = &status.reason {
        output.field("Reason", reason)?;
    }

    if let Some(hint) = next_step(status.state) {
        output.print("")?;
        output.info(hint)?;
    }
    Ok(())
}

fn version_line(status: &ComponentStatus) -> String {
    match status.recorded_version {
        Some(v) => format!("{v} (latest {})", status.latest_version),
        None => format!("none (latest {})", status.latest_version),
    }
}

fn roles_line(status: &ComponentStatus) -> String {
    if status.active_roles.is_empty() {
        "none".into()
    } else {
        status.active_roles.to_string()
    }
}

fn next_step(state: ComponentState) -> Option<&'static str> {
    match state {
        ComponentState::Empty => Some("Run 'strata init' to create a component here"),
        ComponentState::NeedsUpgrade => Some("Run 'strata upgrade' to bring the layout up to date"),
        ComponentState::Incompatible => Some("This folder cannot be managed by strata"),
        ComponentState::UpToDate => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::domain::{Role, RoleSet};

    fn status(recorded: Option<u32>, roles: RoleSet) -> ComponentStatus {
        ComponentStatus {
            component_type: "php-library",
            state: ComponentState::NeedsUpgrade,
            recorded_version: recorded,
            latest_version: 12,
            active_roles: roles,
            reason: None,
        }
    }

    #[test]
    fn version_line_shows_latest() {
        assert_eq!(version_line(&status(Some(9), RoleSet::new())), "9 (latest 12)");
        assert_eq!(version_line(&status(None, RoleSet::new())), "none (latest 12)");
    }

    #[test]
    fn roles_line_lists_roles() {
        let s = status(Some(12), RoleSet::from([Role::Test, Role::Php]));
        assert_eq!(roles_line(&s), "php,test");
        assert_eq!(roles_line(&status(None, RoleSet::new())), "none");
    }

    #[test]
    fn up_to_date_needs_no_hint() {
        assert!(next_step(ComponentState::UpToDate).is_none());
        assert!(next_step(ComponentState::NeedsUpgrade).is_some());
    }
}
