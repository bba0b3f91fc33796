//! The `php-library` component kind.

use crate::domain::{
    kind::{ComponentKind, ProvisionStep, RoleLayout, TemplateInstall, UsageRule},
    role::Role,
    upgrade::{DescriptorField, TransitionTable, UpgradeAction},
};

/// Template names, as served by a template source.
pub mod templates {
    pub const BUILD_XML: &str = "php-library/build.xml";
    pub const BUILD_LOCAL_XML: &str = "php-library/build.local.xml";
    pub const BUILD_PROPERTIES: &str = "php-library/build.properties";
    pub const PACKAGE_XML: &str = "php-library/package-xml.xml";
    pub const README: &str = "php-library/README.md";
    pub const LICENSE: &str = "php-library/LICENSE.txt";
    pub const GITIGNORE: &str = "php-library/gitignore";
    pub const HGIGNORE: &str = "php-library/hgignore";
    pub const BOOTSTRAP: &str = "php-library/bootstrap.php";
    pub const PHPUNIT_DIST: &str = "php-library/phpunit.xml.dist";
    /// `phpunit.xml` as shipped by generations 9 and 10.
    pub const PHPUNIT_LEGACY: &str = "php-library/phpunit.xml";
    pub const DUMMY_PHP: &str = "php-library/dummy.php";
    pub const SRC_README: &str = "php-library/src-README.txt";

    pub const ALL: [&str; 13] = [
        BUILD_XML,
        BUILD_LOCAL_XML,
        BUILD_PROPERTIES,
        PACKAGE_XML,
        README,
        LICENSE,
        GITIGNORE,
        HGIGNORE,
        BOOTSTRAP,
        PHPUNIT_DIST,
        PHPUNIT_LEGACY,
        DUMMY_PHP,
        SRC_README,
    ];
}

use templates::*;

const BOOTSTRAP_DEST: &str = "src/tests/unit-tests/bootstrap.php";
const DUMMY_DEST: &str = "src/php/dummy.php";

const BUILD: TemplateInstall = TemplateInstall::new(BUILD_XML, "build.xml");
const BUILD_LOCAL: TemplateInstall = TemplateInstall::new(BUILD_LOCAL_XML, "build.local.xml");
const TEST_BOOTSTRAP: TemplateInstall =
    TemplateInstall::for_role(Role::Test, BOOTSTRAP, BOOTSTRAP_DEST);
const PHP_PLACEHOLDER: TemplateInstall = TemplateInstall::for_role(Role::Php, DUMMY_PHP, DUMMY_DEST);

/// A reusable PHP library, packaged with PEAR and built with Phing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpLibrary;

impl PhpLibrary {
    pub const COMPONENT_TYPE: &'static str = "php-library";
    pub const LATEST_VERSION: u32 = 12;
}

fn install(template: TemplateInstall) -> UpgradeAction {
    UpgradeAction::InstallTemplate(template)
}

impl ComponentKind for PhpLibrary {
    fn component_type(&self) -> &'static str {
        Self::COMPONENT_TYPE
    }

    fn latest_version(&self) -> u32 {
        Self::LATEST_VERSION
    }

    fn layout(&self, role: Role) -> RoleLayout {
        match role {
            Role::Bin => RoleLayout {
                folders: &["src", "src/bin"],
                unit_test_folder: Some("src/tests/unit-tests/bin"),
                probe: "src/bin",
            },
            Role::Data => RoleLayout {
                folders: &["src", "src/data"],
                unit_test_folder: None,
                probe: "src/data",
            },
            Role::Doc => RoleLayout {
                folders: &["src", "src/docs"],
                unit_test_folder: None,
                probe: "src/docs",
            },
            Role::Php => RoleLayout {
                folders: &["src", "src/php"],
                unit_test_folder: Some("src/tests/unit-tests/php"),
                probe: "src/php",
            },
            Role::Test => RoleLayout {
                folders: &[
                    "src",
                    "src/tests",
                    "src/tests/unit-tests",
                    "src/tests/integration-tests",
                    "src/tests/functional-tests",
                ],
                unit_test_folder: None,
                probe: "src/tests",
            },
            Role::Www => RoleLayout {
                folders: &["src", "src/www"],
                unit_test_folder: Some("src/tests/unit-tests/www"),
                probe: "src/www",
            },
        }
    }

    fn usage_rule(&self, role: Role) -> UsageRule {
        match role {
            Role::Bin => UsageRule {
                folders: &["src/bin", "src/tests/unit-tests/bin"],
                ignorable: &[],
                test_subfolder: Some("bin"),
                container: None,
            },
            Role::Data => UsageRule {
                folders: &["src/data"],
                ignorable: &[],
                test_subfolder: Some("data"),
                container: None,
            },
            Role::Doc => UsageRule {
                folders: &["src/docs"],
                ignorable: &[],
                test_subfolder: None,
                container: None,
            },
            Role::Php => UsageRule {
                folders: &["src/php", "src/tests/unit-tests/php"],
                ignorable: &[],
                test_subfolder: Some("php"),
                container: None,
            },
            Role::Test => UsageRule {
                folders: &[
                    "src/tests/functional-tests",
                    "src/tests/integration-tests",
                    "src/tests/unit-tests",
                ],
                ignorable: &[
                    "bootstrap.php",
                    "functional-tests",
                    "integration-tests",
                    "unit-tests",
                ],
                test_subfolder: None,
                container: Some("src/tests"),
            },
            Role::Www => UsageRule {
                folders: &["src/www", "src/tests/unit-tests/www"],
                ignorable: &[],
                test_subfolder: Some("www"),
                container: None,
            },
        }
    }

    fn placeholder_files(&self) -> &'static [&'static str] {
        &[".empty", "dummy.php"]
    }

    fn sentinel_file(&self) -> &'static str {
        ".empty"
    }

    fn canonical_markers(&self) -> &'static [&'static str] {
        &["build.xml", "package.xml", "src"]
    }

    fn provisioning_steps(&self) -> Vec<ProvisionStep> {
        vec![
            ProvisionStep {
                label: "build files",
                installs: vec![
                    BUILD,
                    BUILD_LOCAL,
                    TemplateInstall::new(BUILD_PROPERTIES, "build.properties"),
                ],
            },
            ProvisionStep {
                label: "package descriptor",
                installs: vec![TemplateInstall::new(PACKAGE_XML, "package.xml")],
            },
            ProvisionStep {
                label: "documentation",
                installs: vec![
                    TemplateInstall::new(README, "README.md"),
                    TemplateInstall::new(LICENSE, "LICENSE.txt"),
                ],
            },
            ProvisionStep {
                label: "SCM ignore files",
                installs: vec![
                    TemplateInstall::new(GITIGNORE, ".gitignore"),
                    TemplateInstall::new(HGIGNORE, ".hgignore"),
                ],
            },
            ProvisionStep {
                label: "test harness",
                installs: vec![
                    TEST_BOOTSTRAP,
                    TemplateInstall::for_role(Role::Test, PHPUNIT_DIST, "phpunit.xml.dist"),
                ],
            },
            ProvisionStep {
                label: "php placeholder",
                installs: vec![PHP_PLACEHOLDER],
            },
            ProvisionStep {
                label: "source README",
                installs: vec![TemplateInstall::new(SRC_README, "src/README.txt")],
            },
        ]
    }

    fn transitions(&self) -> TransitionTable {
        TransitionTable::starting_at(1)
            .step(
                "refresh build file and ignore files",
                vec![
                    install(BUILD),
                    install(TemplateInstall::new(GITIGNORE, ".gitignore")),
                    install(TemplateInstall::new(HGIGNORE, ".hgignore")),
                    install(TEST_BOOTSTRAP),
                ],
            )
            .step("refresh build file", vec![install(BUILD)])
            .step(
                "add docs folder and PEAR channel properties",
                vec![
                    UpgradeAction::EnsureRoleFolders,
                    UpgradeAction::CreateFolder("src/docs"),
                    install(BUILD),
                    UpgradeAction::AddProperty {
                        key: "project.channel",
                        value: "pear.example.com",
                        after: None,
                    },
                    UpgradeAction::AddProperty {
                        key: "pear.local",
                        value: "/var/www/${project.channel}",
                        after: None,
                    },
                    install(PHP_PLACEHOLDER),
                ],
            )
            .step("refresh build file", vec![install(BUILD)])
            .step(
                "refresh build and local build files",
                vec![install(BUILD), install(BUILD_LOCAL)],
            )
            .step("refresh unit test bootstrap", vec![install(TEST_BOOTSTRAP)])
            .step("refresh build file", vec![install(BUILD)])
            .step(
                "refresh build file and phpunit config",
                vec![
                    install(BUILD),
                    install(TemplateInstall::for_role(Role::Test, PHPUNIT_LEGACY, "phpunit.xml")),
                ],
            )
            .step(
                "snapshot builds and descriptor placeholders",
                vec![
                    install(BUILD),
                    UpgradeAction::AddProperty {
                        key: "project.snapshot",
                        value: "false",
                        after: Some("project.patchLevel"),
                    },
                    UpgradeAction::EditDescriptor {
                        field: DescriptorField::ReleaseVersion,
                        value: "${project.version}",
                    },
                    UpgradeAction::EditDescriptor {
                        field: DescriptorField::ReleaseStability,
                        value: "${project.stability}",
                    },
                    UpgradeAction::Substitute {
                        file: "build.local.xml",
                        replacements: &[
                            (
                                r#"project default="local-help""#,
                                r#"project name="local" default="help""#,
                            ),
                            (r#"target name="local-help""#, r#"target name="help""#),
                        ],
                    },
                ],
            )
            .step(
                "source README and phpunit.xml.dist",
                vec![
                    install(TemplateInstall::new(SRC_README, "src/README.txt")),
                    UpgradeAction::RenameOrReplace {
                        file: "phpunit.xml",
                        previous_template: PHPUNIT_LEGACY,
                        install: TemplateInstall::for_role(
                            Role::Test,
                            PHPUNIT_DIST,
                            "phpunit.xml.dist",
                        ),
                    },
                    install(BUILD),
                    install(TEST_BOOTSTRAP),
                ],
            )
            .step("refresh build file", vec![install(BUILD)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_reaches_latest_version() {
        let table = PhpLibrary.transitions();
        assert_eq!(table.first(), 1);
        assert_eq!(table.latest(), PhpLibrary::LATEST_VERSION);
        assert_eq!(table.len(), 11);
    }

    #[test]
    fn every_transition_has_actions() {
        let table = PhpLibrary.transitions();
        for step in table.plan(1, PhpLibrary::LATEST_VERSION).unwrap() {
            assert!(!step.actions.is_empty(), "step {} is empty", step.from);
        }
    }

    #[test]
    fn probes_are_among_role_folders() {
        for role in Role::ALL {
            let layout = PhpLibrary.layout(role);
            assert!(layout.folders.contains(&layout.probe), "{role}");
        }
    }

    #[test]
    fn every_referenced_template_is_known() {
        let kind = PhpLibrary;
        let provisioned = kind
            .provisioning_steps()
            .into_iter()
            .flat_map(|s| s.installs)
            .map(|i| i.template);

        let table = kind.transitions();
        let upgraded = table
            .plan(1, PhpLibrary::LATEST_VERSION)
            .unwrap()
            .iter()
            .flat_map(|s| s.actions.iter())
            .filter_map(|a| match a {
                UpgradeAction::InstallTemplate(i) => Some(i.template),
                UpgradeAction::RenameOrReplace {
                    previous_template,
                    install,
                    ..
                } => {
                    assert!(templates::ALL.contains(previous_template));
                    Some(install.template)
                }
                _ => None,
            })
            .collect::<Vec<_>>();

        for name in provisioned.chain(upgraded) {
            assert!(templates::ALL.contains(&name), "{name}");
        }
    }
}
