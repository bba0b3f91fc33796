//! Detection of roles that hold no real user content.
//!
//! The algorithm is pure: it never touches the filesystem itself. Callers
//! hand in a lister that returns the entries of a component-relative folder,
//! or `None` when the folder does not exist.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{
    common::RelativePath,
    error::DomainError,
    kind::ComponentKind,
    role::Role,
};

/// One entry of a listed folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    pub is_dir: bool,
}

impl FolderEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Roles safe to drop, with the folders to delete for each.
///
/// A role absent from the report is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnusedRoleReport(BTreeMap<Role, Vec<RelativePath>>);

impl UnusedRoleReport {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains_key(&role)
    }

    pub fn folders(&self, role: Role) -> Option<&[RelativePath]> {
        self.0.get(&role).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &[RelativePath])> {
        self.0.iter().map(|(role, folders)| (*role, folders.as_slice()))
    }

    /// Total number of folders across all roles.
    pub fn folder_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// Work out which roles of `kind` are unused.
///
/// Non-`test` roles are judged first. Each one found unused adds its test
/// subfolder name to the names the `test` role ignores. A leftover test
/// folder of an abandoned sibling holds nothing but placeholders, so it
/// cannot keep `test` alive on its own; real files under it still do.
///
/// A role is only reported if at least one of its folders exists; a role
/// that left nothing on disk has nothing to reclaim.
pub fn detect_unused_roles<F, E>(
    kind: &dyn ComponentKind,
    mut list: F,
) -> Result<UnusedRoleReport, E>
where
    F: FnMut(&RelativePath) -> Result<Option<Vec<FolderEntry>>, E>,
    E: From<DomainError>,
{
    let placeholders: BTreeSet<String> = kind
        .placeholder_files()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut report = BTreeMap::new();
    let mut abandoned_test_folders = BTreeSet::new();

    let ordered = Role::ALL
        .iter()
        .filter(|r| !r.is_test())
        .chain(Role::ALL.iter().filter(|r| r.is_test()));

    for &role in ordered {
        let rule = kind.usage_rule(role);

        let mut ignorable = placeholders.clone();
        ignorable.extend(rule.ignorable.iter().map(|s| s.to_string()));
        if role.is_test() {
            ignorable.extend(abandoned_test_folders.iter().cloned());
        }

        let folders: Vec<RelativePath> =
            rule.folders.iter().copied().map(RelativePath::from).collect();

        let mut unused = true;
        for folder in &folders {
            if !folder_is_unused(folder, &ignorable, &mut list)? {
                unused = false;
                break;
            }
        }

        if !unused {
            continue;
        }

        if let Some(name) = rule.test_subfolder {
            abandoned_test_folders.insert(name.to_string());
        }

        let mut to_remove = folders;
        if let Some(container) = rule.container {
            to_remove.push(RelativePath::from(container));
        }

        let mut anything_on_disk = false;
        for folder in &to_remove {
            if list(folder)?.is_some() {
                anything_on_disk = true;
                break;
            }
        }

        if anything_on_disk {
            report.insert(role, to_remove);
        }
    }

    Ok(UnusedRoleReport(report))
}

/// A folder is unused if it is missing, or every entry is an ignorable file
/// or an unused folder itself.
///
/// Ignorable names only apply to files. A directory is always descended
/// into, whatever it is called.
fn folder_is_unused<F, E>(
    folder: &RelativePath,
    ignorable: &BTreeSet<String>,
    list: &mut F,
) -> Result<bool, E>
where
    F: FnMut(&RelativePath) -> Result<Option<Vec<FolderEntry>>, E>,
    E: From<DomainError>,
{
    let Some(entries) = list(folder)? else {
        return Ok(true);
    };

    for entry in entries {
        let unused = if entry.is_dir {
            folder_is_unused(&folder.join(&entry.name)?, ignorable, list)?
        } else {
            ignorable.contains(&entry.name)
        };
        if !unused {
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kinds::PhpLibrary;
    use std::collections::HashMap;

    /// A fake tree: folder -> entries.
    #[derive(Default)]
    struct Tree(HashMap<String, Vec<FolderEntry>>);

    impl Tree {
        fn folder(mut self, path: &str, entries: Vec<FolderEntry>) -> Self {
            self.0.insert(path.to_string(), entries);
            self
        }

        fn detect(&self) -> UnusedRoleReport {
            detect_unused_roles::<_, DomainError>(&PhpLibrary, |p| {
                Ok(self.0.get(&p.to_string()).cloned())
            })
            .unwrap()
        }
    }

    fn sentinel() -> Vec<FolderEntry> {
        vec![FolderEntry::file(".empty")]
    }

    #[test]
    fn placeholder_only_role_is_unused() {
        let tree = Tree::default().folder("src/bin", sentinel());
        let report = tree.detect();

        assert!(report.contains(Role::Bin));
        assert_eq!(
            report.folders(Role::Bin).unwrap(),
            &[
                RelativePath::from("src/bin"),
                RelativePath::from("src/tests/unit-tests/bin")
            ]
        );
    }

    #[test]
    fn one_real_file_keeps_the_role() {
        let tree = Tree::default().folder(
            "src/bin",
            vec![FolderEntry::file(".empty"), FolderEntry::file("tool.php")],
        );
        assert!(!tree.detect().contains(Role::Bin));
    }

    #[test]
    fn roles_with_nothing_on_disk_are_not_reported() {
        let report = Tree::default().detect();
        assert!(report.is_empty());
    }

    #[test]
    fn nested_empty_folders_count_as_unused() {
        let tree = Tree::default()
            .folder("src/www", vec![FolderEntry::dir("css")])
            .folder("src/www/css", sentinel());
        assert!(tree.detect().contains(Role::Www));
    }

    #[test]
    fn content_under_a_placeholder_named_folder_keeps_the_role() {
        let tree = Tree::default()
            .folder("src/php", vec![FolderEntry::file("Lib.php")])
            .folder("src/tests", vec![FolderEntry::dir("integration-tests")])
            .folder("src/tests/integration-tests", vec![FolderEntry::dir("unit-tests")])
            .folder(
                "src/tests/integration-tests/unit-tests",
                vec![FolderEntry::file("RealTest.php")],
            );

        assert!(!tree.detect().contains(Role::Test));
    }

    #[test]
    fn fixture_under_an_abandoned_sibling_name_keeps_test() {
        let tree = Tree::default()
            .folder("src/data", sentinel())
            .folder("src/tests", vec![FolderEntry::dir("functional-tests")])
            .folder("src/tests/functional-tests", vec![FolderEntry::dir("data")])
            .folder(
                "src/tests/functional-tests/data",
                vec![FolderEntry::file("fixture.json")],
            );

        let report = tree.detect();
        assert!(report.contains(Role::Data));
        assert!(!report.contains(Role::Test));
    }

    #[test]
    fn empty_test_folder_of_an_abandoned_sibling_is_reclaimed() {
        let tree = Tree::default()
            .folder("src/bin", sentinel())
            .folder("src/tests", vec![FolderEntry::dir("unit-tests")])
            .folder(
                "src/tests/unit-tests",
                vec![FolderEntry::file("bootstrap.php"), FolderEntry::dir("bin")],
            )
            .folder("src/tests/unit-tests/bin", sentinel());

        let report = tree.detect();
        assert!(report.contains(Role::Bin));
        assert!(report.contains(Role::Test));
    }

    #[test]
    fn used_sibling_test_folder_keeps_both_roles() {
        let tree = Tree::default()
            .folder("src/bin", sentinel())
            .folder("src/php", vec![FolderEntry::file("Lib.php")])
            .folder("src/tests", vec![FolderEntry::dir("unit-tests")])
            .folder(
                "src/tests/unit-tests",
                vec![FolderEntry::file("bootstrap.php"), FolderEntry::dir("bin")],
            )
            .folder("src/tests/unit-tests/bin", vec![FolderEntry::file("notes.txt")]);

        let report = tree.detect();
        assert!(!report.contains(Role::Bin));
        assert!(!report.contains(Role::Test));
        assert!(!report.contains(Role::Php));
    }

    #[test]
    fn test_role_is_reclaimed_once_siblings_are_gone() {
        let tree = Tree::default()
            .folder("src/data", sentinel())
            .folder("src/tests", vec![FolderEntry::dir("unit-tests")])
            .folder(
                "src/tests/unit-tests",
                vec![FolderEntry::file("bootstrap.php"), FolderEntry::file("data")],
            );

        let report = tree.detect();
        assert!(report.contains(Role::Data));
        assert!(report.contains(Role::Test));
        assert_eq!(
            report.folders(Role::Test).unwrap().last(),
            Some(&RelativePath::from("src/tests"))
        );
    }

    #[test]
    fn real_tests_keep_test_role() {
        let tree = Tree::default()
            .folder("src/tests", vec![FolderEntry::dir("unit-tests")])
            .folder(
                "src/tests/unit-tests",
                vec![FolderEntry::file("bootstrap.php"), FolderEntry::dir("php")],
            )
            .folder("src/tests/unit-tests/php", vec![FolderEntry::file("LibTest.php")])
            .folder("src/php", vec![FolderEntry::file("Lib.php")]);

        let report = tree.detect();
        assert!(!report.contains(Role::Test));
        assert!(!report.contains(Role::Php));
    }
}
