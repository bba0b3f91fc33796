//! Component Service - main application orchestrator.
//!
//! One service instance is bound to one [`ComponentKind`] and a set of
//! adapters. Every operation takes the component root and re-derives
//! everything it needs (state, active roles) from disk before acting.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PackageDescriptor, PropertiesStore, Reporter, TemplateSource},
    },
    domain::{
        Classification, ComponentKind, ComponentState, RelativePath, Role, RoleRegistry, RoleSet,
        TemplateInstall, VersionMarker, classify,
    },
    error::{StrataError, StrataResult},
};

/// Properties key holding the component kind.
pub const TYPE_KEY: &str = "component.type";
/// Properties key holding the layout generation.
pub const VERSION_KEY: &str = "component.version";

/// Snapshot returned by [`ComponentService::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentStatus {
    pub component_type: &'static str,
    pub state: ComponentState,
    pub recorded_version: Option<u32>,
    pub latest_version: u32,
    pub active_roles: RoleSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Provisions, upgrades and reclaims components of one kind.
pub struct ComponentService {
    pub(super) kind: Box<dyn ComponentKind>,
    pub(super) filesystem: Box<dyn Filesystem>,
    pub(super) templates: Box<dyn TemplateSource>,
    pub(super) properties: Box<dyn PropertiesStore>,
    pub(super) descriptor: Box<dyn PackageDescriptor>,
    pub(super) reporter: Box<dyn Reporter>,
}

impl ComponentService {
    /// Create a new component service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use strata_core::{application::ComponentService, domain::PhpLibrary};
    ///
    /// let service = ComponentService::new(
    ///     Box::new(PhpLibrary),
    ///     filesystem, // impl Filesystem
    ///     templates,  // impl TemplateSource
    ///     properties, // impl PropertiesStore
    ///     descriptor, // impl PackageDescriptor
    ///     reporter,   // impl Reporter
    /// );
    /// ```
    pub fn new(
        kind: Box<dyn ComponentKind>,
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateSource>,
        properties: Box<dyn PropertiesStore>,
        descriptor: Box<dyn PackageDescriptor>,
        reporter: Box<dyn Reporter>,
    ) -> Self {
        Self {
            kind,
            filesystem,
            templates,
            properties,
            descriptor,
            reporter,
        }
    }

    pub fn kind(&self) -> &dyn ComponentKind {
        self.kind.as_ref()
    }

    pub fn registry(&self) -> RoleRegistry<'_> {
        RoleRegistry::new(self.kind.as_ref())
    }

    pub fn latest_version(&self) -> u32 {
        self.kind.latest_version()
    }

    /// Classify the directory at `root`.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn classify(&self, root: &Path) -> StrataResult<Classification> {
        let marker = self.read_marker(root)?;
        let classification = classify(
            &marker,
            self.kind.component_type(),
            self.kind.latest_version(),
        );
        debug!(state = %classification.state, version = ?classification.recorded_version, "Classified");
        Ok(classification)
    }

    /// State, version and active roles of the directory at `root`.
    pub fn status(&self, root: &Path) -> StrataResult<ComponentStatus> {
        let classification = self.classify(root)?;
        Ok(ComponentStatus {
            component_type: self.kind.component_type(),
            state: classification.state,
            recorded_version: classification.recorded_version,
            latest_version: self.kind.latest_version(),
            active_roles: self.active_roles(root),
            reason: classification.reason,
        })
    }

    /// Roles whose probe folder exists right now.
    pub fn active_roles(&self, root: &Path) -> RoleSet {
        let registry = self.registry();
        Role::ALL
            .into_iter()
            .filter(|role| self.filesystem.is_dir(&registry.probe(*role).under(root)))
            .collect()
    }

    /// Template names available to this service.
    pub fn list_templates(&self) -> StrataResult<Vec<String>> {
        self.templates.list()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    pub(super) fn read_marker(&self, root: &Path) -> StrataResult<VersionMarker> {
        if !self.properties.exists(root) {
            let has_canonical_artifacts = self
                .kind
                .canonical_markers()
                .iter()
                .any(|marker| self.filesystem.exists(&root.join(marker)));
            return Ok(VersionMarker::Missing {
                has_canonical_artifacts,
            });
        }

        Ok(VersionMarker::Recorded {
            component_type: self.properties.read(root, TYPE_KEY)?,
            version: self.properties.read(root, VERSION_KEY)?,
        })
    }

    /// Classify and insist on a component this kind can work with.
    pub(super) fn require_managed(&self, root: &Path) -> StrataResult<Classification> {
        let classification = self.classify(root)?;
        match classification.state {
            ComponentState::Incompatible => Err(ApplicationError::IncompatibleLayout {
                path: root.to_path_buf(),
                reason: classification.reason.unwrap_or_default(),
            }
            .into()),
            ComponentState::Empty => Err(ApplicationError::NotAComponent {
                path: root.to_path_buf(),
            }
            .into()),
            ComponentState::NeedsUpgrade | ComponentState::UpToDate => Ok(classification),
        }
    }

    /// Create `folder` if missing and drop the sentinel into it.
    pub(super) fn ensure_folder(&self, root: &Path, folder: &RelativePath) -> StrataResult<()> {
        let path = folder.under(root);
        let creation_failed = |reason: String| -> StrataError {
            ApplicationError::FolderCreation {
                path: path.clone(),
                reason,
            }
            .into()
        };

        if self.filesystem.exists(&path) && !self.filesystem.is_dir(&path) {
            return Err(creation_failed("a file is in the way".into()));
        }

        if !self.filesystem.is_dir(&path) {
            self.filesystem
                .create_dir_all(&path)
                .map_err(|e| creation_failed(e.to_string()))?;
            debug!(folder = %folder, "Created folder");
        }

        let sentinel = path.join(self.kind.sentinel_file());
        if !self.filesystem.exists(&sentinel) {
            self.filesystem
                .write_file(&sentinel, b"")
                .map_err(|e| creation_failed(e.to_string()))?;
        }

        Ok(())
    }

    /// Copy a template into the component, unless its role is inactive.
    ///
    /// Returns whether anything was written.
    pub(super) fn install(
        &self,
        root: &Path,
        install: &TemplateInstall,
        active: &RoleSet,
    ) -> StrataResult<bool> {
        if let Some(role) = install.requires {
            if !active.contains(role) {
                debug!(template = install.template, %role, "Skipped, role inactive");
                return Ok(false);
            }
        }

        let content = self.templates.fetch(install.template)?;
        let destination = RelativePath::try_new(install.destination)?.under(root);

        if let Some(parent) = destination.parent() {
            if !self.filesystem.is_dir(parent) {
                self.filesystem.create_dir_all(parent)?;
            }
        }

        self.filesystem.write_file(&destination, &content)?;
        debug!(template = install.template, destination = install.destination, "Installed");
        Ok(true)
    }
}

#[cfg(test)]
pub(super) mod test_support {
    use std::path::Path;
    use std::sync::Mutex;

    use super::*;
    use crate::application::ports::{
        MockFilesystem, MockPackageDescriptor, MockReporter, MockTemplateSource,
    };
    use crate::domain::PhpLibrary;

    /// In-memory properties store, keyed by insertion order.
    #[derive(Default)]
    pub struct FakeProperties {
        pub entries: Mutex<Option<Vec<(String, String)>>>,
    }

    impl FakeProperties {
        pub fn recorded(component_type: &str, version: &str) -> Self {
            Self {
                entries: Mutex::new(Some(vec![
                    (TYPE_KEY.into(), component_type.into()),
                    (VERSION_KEY.into(), version.into()),
                ])),
            }
        }
    }

    impl PropertiesStore for FakeProperties {
        fn exists(&self, _root: &Path) -> bool {
            self.entries.lock().unwrap().is_some()
        }

        fn read_all(&self, _root: &Path) -> StrataResult<Vec<(String, String)>> {
            Ok(self.entries.lock().unwrap().clone().unwrap_or_default())
        }

        fn read(&self, root: &Path, key: &str) -> StrataResult<Option<String>> {
            Ok(self
                .read_all(root)?
                .into_iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v))
        }

        fn write(&self, _root: &Path, key: &str, value: &str) -> StrataResult<()> {
            let mut guard = self.entries.lock().unwrap();
            let entries = guard.get_or_insert_with(Vec::new);
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value.into(),
                None => entries.push((key.into(), value.into())),
            }
            Ok(())
        }

        fn append(
            &self,
            root: &Path,
            key: &str,
            value: &str,
            _after: Option<&str>,
        ) -> StrataResult<()> {
            self.write(root, key, value)
        }
    }

    /// Mocks with no expectations: any unexpected call fails the test.
    pub struct Ports {
        pub filesystem: MockFilesystem,
        pub templates: MockTemplateSource,
        pub properties: FakeProperties,
        pub descriptor: MockPackageDescriptor,
        pub reporter: MockReporter,
    }

    impl Ports {
        pub fn new(properties: FakeProperties) -> Self {
            Self {
                filesystem: MockFilesystem::new(),
                templates: MockTemplateSource::new(),
                properties,
                descriptor: MockPackageDescriptor::new(),
                reporter: MockReporter::new(),
            }
        }

        pub fn into_service(self) -> ComponentService {
            ComponentService::new(
                Box::new(PhpLibrary),
                Box::new(self.filesystem),
                Box::new(self.templates),
                Box::new(self.properties),
                Box::new(self.descriptor),
                Box::new(self.reporter),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::test_support::{FakeProperties, Ports};
    use super::*;

    #[test]
    fn bare_directory_is_empty() {
        let mut ports = Ports::new(FakeProperties::default());
        ports.filesystem.expect_exists().returning(|_| false);

        let service = ports.into_service();
        let c = service.classify(Path::new("/work/lib")).unwrap();
        assert_eq!(c.state, ComponentState::Empty);
    }

    #[test]
    fn stray_build_file_makes_directory_incompatible() {
        let mut ports = Ports::new(FakeProperties::default());
        ports
            .filesystem
            .expect_exists()
            .returning(|p| p.ends_with("build.xml"));

        let service = ports.into_service();
        let c = service.classify(Path::new("/work/lib")).unwrap();
        assert_eq!(c.state, ComponentState::Incompatible);
    }

    #[test]
    fn status_probes_active_roles() {
        let mut ports = Ports::new(FakeProperties::recorded("php-library", "9"));
        ports
            .filesystem
            .expect_is_dir()
            .returning(|p| p.ends_with("src/php") || p.ends_with("src/tests"));

        let status = ports.into_service().status(Path::new("/work/lib")).unwrap();
        assert_eq!(status.state, ComponentState::NeedsUpgrade);
        assert_eq!(status.recorded_version, Some(9));
        assert_eq!(status.active_roles, RoleSet::from([Role::Php, Role::Test]));
    }

    #[test]
    fn folder_blocked_by_a_file_fails_creation() {
        let mut ports = Ports::new(FakeProperties::default());
        ports.filesystem.expect_exists().returning(|_| true);
        ports.filesystem.expect_is_dir().returning(|_| false);

        let service = ports.into_service();
        let err = service
            .ensure_folder(Path::new("/work/lib"), &RelativePath::from("src"))
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::FolderCreation { .. })
        ));
    }

    #[test]
    fn gated_install_skips_inactive_role() {
        let ports = Ports::new(FakeProperties::default());
        let service = ports.into_service();

        let install = TemplateInstall::for_role(Role::Test, "php-library/bootstrap.php", "x.php");
        let wrote = service
            .install(Path::new("/work/lib"), &install, &RoleSet::from([Role::Php]))
            .unwrap();
        assert!(!wrote);
    }
}
