use std::collections::HashSet;

use crate::domain::{
    common::RelativePath,
    kind::ComponentKind,
    role::{Role, RoleSet},
};

/// Resolves role selections into the folders they require.
///
/// Holds no state of its own; it is a read-only view over a kind's layout
/// table.
#[derive(Clone, Copy)]
pub struct RoleRegistry<'k> {
    kind: &'k dyn ComponentKind,
}

impl<'k> RoleRegistry<'k> {
    pub fn new(kind: &'k dyn ComponentKind) -> Self {
        Self { kind }
    }

    /// Ordered, deduplicated folders required by `roles`.
    ///
    /// Each role contributes its canonical folders. When `test` is selected,
    /// every other selected role also contributes its unit-test folder. A
    /// folder requested twice keeps its first position.
    pub fn resolve(&self, roles: &RoleSet) -> Vec<RelativePath> {
        let with_tests = roles.contains(Role::Test);

        let canonical = roles
            .iter()
            .flat_map(|role| self.kind.layout(role).folders.iter().copied());

        let unit_tests = roles
            .iter()
            .filter(|role| with_tests && !role.is_test())
            .filter_map(|role| self.kind.layout(role).unit_test_folder);

        let mut seen = HashSet::new();
        canonical
            .chain(unit_tests)
            .filter(|folder| seen.insert(*folder))
            .map(RelativePath::from)
            .collect()
    }

    /// Folder whose existence marks `role` as active.
    pub fn probe(&self, role: Role) -> RelativePath {
        RelativePath::from(self.kind.layout(role).probe)
    }
}
