use std::path::Path;

use tracing::{info, instrument};

use super::component_service::{ComponentService, TYPE_KEY, VERSION_KEY};
use crate::{
    application::ApplicationError,
    domain::{ComponentState, DomainValidator as validator, RoleSet, classify},
    error::StrataResult,
};

impl ComponentService {
    /// Create every folder `roles` requires, then report the roles now active.
    ///
    /// Stops at the first folder that cannot be created; folders created
    /// before it stay.
    #[instrument(skip(self), fields(root = %root.display(), roles = %roles))]
    pub fn create_folders(&self, root: &Path, roles: &RoleSet) -> StrataResult<RoleSet> {
        validator::validate_roles(roles)?;

        for folder in self.registry().resolve(roles) {
            self.ensure_folder(root, &folder)?;
        }

        Ok(self.active_roles(root))
    }

    /// Provision a brand-new component at the latest generation.
    ///
    /// The component type is recorded before anything else and the version
    /// last. A run that failed in between leaves a type without a version,
    /// and calling this again picks up where it stopped.
    #[instrument(skip(self), fields(root = %root.display(), roles = %roles))]
    pub fn create_component(&self, root: &Path, roles: &RoleSet) -> StrataResult<RoleSet> {
        validator::validate_roles(roles)?;

        let component_type = self.kind.component_type();
        let marker = self.read_marker(root)?;

        if marker.is_provisioning(component_type) {
            self.reporter.info(&format!(
                "Resuming unfinished {component_type} component in {}",
                root.display()
            ));
        } else {
            let classification = classify(&marker, component_type, self.kind.latest_version());
            match classification.state {
                ComponentState::Empty => {}
                ComponentState::Incompatible => {
                    return Err(ApplicationError::IncompatibleLayout {
                        path: root.to_path_buf(),
                        reason: classification.reason.unwrap_or_default(),
                    }
                    .into());
                }
                ComponentState::NeedsUpgrade | ComponentState::UpToDate => {
                    return Err(ApplicationError::ComponentExists {
                        path: root.to_path_buf(),
                    }
                    .into());
                }
            }
            self.reporter.info(&format!(
                "Creating {component_type} component in {}",
                root.display()
            ));
        }

        self.properties.write(root, TYPE_KEY, component_type)?;
        let active = self.create_folders(root, roles)?;

        for step in self.kind.provisioning_steps() {
            let mut written = 0;
            for install in &step.installs {
                if self.install(root, install, &active)? {
                    written += 1;
                }
            }
            if written > 0 {
                self.reporter.info(&format!("Installed {}", step.label));
            }
            info!(step = step.label, written, "Provisioning step complete");
            // An installed properties template replaces the type marker.
            self.properties.write(root, TYPE_KEY, component_type)?;
        }

        let latest = self.kind.latest_version();
        self.properties
            .write(root, VERSION_KEY, &latest.to_string())?;

        info!(version = latest, roles = %active, "Component created");
        Ok(active)
    }

    /// Add roles to an existing component.
    ///
    /// Role-specific files are installed only for roles that were not active
    /// before; the recorded version is left alone.
    #[instrument(skip(self), fields(root = %root.display(), roles = %roles))]
    pub fn add_roles(&self, root: &Path, roles: &RoleSet) -> StrataResult<RoleSet> {
        validator::validate_roles(roles)?;
        self.require_managed(root)?;

        let before = self.active_roles(root);
        let active = self.create_folders(root, &before.union(roles))?;
        let newly_active = active.difference(&before);

        for role in newly_active.iter() {
            self.reporter.info(&format!("Added role {role}"));
        }

        for step in self.kind.provisioning_steps() {
            for install in &step.installs {
                let gated_on_new_role = install
                    .requires
                    .is_some_and(|role| newly_active.contains(role));
                if gated_on_new_role {
                    self.install(root, install, &active)?;
                }
            }
        }

        info!(added = %newly_active, "Roles added");
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::super::component_service::test_support::{FakeProperties, Ports};
    use crate::application::{ApplicationError, ports::PropertiesStore};
    use crate::domain::{DomainError, Role, RoleSet};
    use crate::error::StrataError;

    #[test]
    fn empty_role_set_is_rejected_before_touching_disk() {
        let service = Ports::new(FakeProperties::default()).into_service();
        let err = service
            .create_component(Path::new("/work/lib"), &RoleSet::new())
            .unwrap_err();
        assert_eq!(err, StrataError::Domain(DomainError::EmptyRoleSet));
    }

    #[test]
    fn create_refuses_existing_component() {
        let service = Ports::new(FakeProperties::recorded("php-library", "12")).into_service();
        let err = service
            .create_component(Path::new("/work/lib"), &RoleSet::from([Role::Php]))
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::ComponentExists { .. })
        ));
    }

    #[test]
    fn create_refuses_foreign_layout() {
        let mut ports = Ports::new(FakeProperties::default());
        ports
            .filesystem
            .expect_exists()
            .returning(|p| p.ends_with("package.xml"));

        let err = ports
            .into_service()
            .create_component(Path::new("/work/lib"), &RoleSet::from([Role::Php]))
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::IncompatibleLayout { .. })
        ));
    }

    #[test]
    fn unfinished_provisioning_of_another_kind_is_not_resumed() {
        let properties = FakeProperties::default();
        properties.write(Path::new("/work/lib"), "component.type", "php-app").unwrap();

        let err = Ports::new(properties)
            .into_service()
            .create_component(Path::new("/work/lib"), &RoleSet::from([Role::Php]))
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::IncompatibleLayout { .. })
        ));
    }

    #[test]
    fn add_roles_needs_a_component() {
        let mut ports = Ports::new(FakeProperties::default());
        ports.filesystem.expect_exists().returning(|_| false);

        let err = ports
            .into_service()
            .add_roles(Path::new("/work/lib"), &RoleSet::from([Role::Www]))
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::NotAComponent { .. })
        ));
    }
}
