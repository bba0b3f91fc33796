//! `strata init`: provision a new component.

use std::fs;

use tracing::{info, instrument};

use strata_core::domain::RoleSet;

use crate::{
    cli::{InitArgs, role_set},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    service::component_service,
};

/// Create the folder if needed and provision a component in it.
#[instrument(skip_all, fields(folder = %args.folder.display()))]
pub fn execute(args: InitArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let roles = resolve_roles(&args, config)?;

    fs::create_dir_all(&args.folder).map_err(|e| CliError::IoError {
        message: format!("Failed to create '{}'", args.folder.display()),
        source: e,
    })?;

    let service = component_service(config, output);
    let active = service.create_component(&args.folder, &roles)?;
    info!(roles = %active, "Component initialised");

    if output.is_json() {
        return output.json(&service.status(&args.folder)?);
    }

    output.success(&format!(
        "Created {} component (v{}) in {}",
        service.kind().component_type(),
        service.latest_version(),
        args.folder.display(),
    ))?;
    output.field("Roles", &active.to_string())?;
    Ok(())
}

/// `--roles` if given, else `defaults.roles` from the config.
fn resolve_roles(args: &InitArgs, config: &AppConfig) -> CliResult<RoleSet> {
    if !args.roles.is_empty() {
        return Ok(role_set(&args.roles));
    }
    RoleSet::parse(&config.defaults.roles).map_err(|e| CliError::ConfigError {
        message: format!("defaults.roles: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RoleArg;
    use strata_core::domain::Role;

    fn args(roles: Vec<RoleArg>) -> InitArgs {
        InitArgs {
            folder: ".".into(),
            roles,
        }
    }

    #[test]
    fn explicit_roles_win() {
        let roles = resolve_roles(&args(vec![RoleArg::Www]), &AppConfig::default()).unwrap();
        assert_eq!(roles, RoleSet::from([Role::Www]));
    }

    #[test]
    fn config_defaults_fill_in() {
        let roles = resolve_roles(&args(vec![]), &AppConfig::default()).unwrap();
        assert_eq!(roles, RoleSet::from([Role::Php, Role::Test]));
    }

    #[test]
    fn bad_config_role_is_a_config_error() {
        let mut config = AppConfig::default();
        config.defaults.roles = vec!["php".into(), "cgi".into()];
        assert!(matches!(
            resolve_roles(&args(vec![]), &config),
            Err(CliError::ConfigError { .. })
        ));
    }
}
