//! `strata templates`: list template names.

use crate::{
    config::AppConfig, error::CliResult, output::OutputManager, service::component_service,
};

pub fn execute(config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = component_service(config, output);
    let mut names = service.list_templates()?;
    names.sort();

    if output.is_json() {
        return output.json(&names);
    }

    output.header("Available Templates:")?;
    for name in &names {
        output.print(&format!("  {name}"))?;
    }
    Ok(())
}
