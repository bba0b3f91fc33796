//! Wiring of the core service to concrete adapters.

use tracing::debug;

use strata_adapters::{
    BuildPropertiesFile, DirectoryTemplateSource, EmbeddedTemplates, LocalFilesystem,
    PackageXmlFile,
};
use strata_core::{
    application::{ComponentService, ports::TemplateSource},
    domain::{ComponentKind, PhpLibrary},
};

use crate::{config::AppConfig, output::OutputManager};

/// Build a `php-library` service over the local disk.
///
/// Templates come from a directory when one is configured (environment, then
/// config) and holds a `php-library` folder; otherwise the embedded set is
/// used.
pub fn component_service(config: &AppConfig, output: &OutputManager) -> ComponentService {
    let kind = PhpLibrary;

    let templates: Box<dyn TemplateSource> = match DirectoryTemplateSource::discover(
        config.templates.local_path.as_deref(),
        kind.component_type(),
    ) {
        Some(source) => {
            debug!(root = %source.root().display(), "Using template directory");
            Box::new(source)
        }
        None => Box::new(EmbeddedTemplates::new()),
    };

    ComponentService::new(
        Box::new(kind),
        Box::new(LocalFilesystem::new()),
        templates,
        Box::new(BuildPropertiesFile::new()),
        Box::new(PackageXmlFile::new()),
        Box::new(output.reporter()),
    )
}
