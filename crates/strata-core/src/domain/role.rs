//! Component roles: the optional facets a component can carry.
//!
//! # Design
//!
//! `Role` is a closed enumeration. Every table keyed by role (folders,
//! probes, usage rules) is an exhaustive `match`, so adding a variant is a
//! compile error everywhere a decision has to be made.
//!
//! `RoleSet` is ordered by the enumeration order, not by insertion order.
//! Anything derived from a set (folder lists, reports) is therefore stable
//! under reordering of the caller's input.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// An optional facet of a component that activates a subset of folders/files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bin,
    Data,
    Doc,
    Php,
    Test,
    Www,
}

impl Role {
    /// Every role, in canonical order.
    pub const ALL: [Role; 6] = [
        Role::Bin,
        Role::Data,
        Role::Doc,
        Role::Php,
        Role::Test,
        Role::Www,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bin => "bin",
            Self::Data => "data",
            Self::Doc => "doc",
            Self::Php => "php",
            Self::Test => "test",
            Self::Www => "www",
        }
    }

    pub const fn is_test(self) -> bool {
        matches!(self, Self::Test)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bin" => Ok(Self::Bin),
            "data" => Ok(Self::Data),
            "doc" | "docs" => Ok(Self::Doc),
            "php" => Ok(Self::Php),
            "test" | "tests" => Ok(Self::Test),
            "www" => Ok(Self::Www),
            other => Err(DomainError::UnknownRole {
                name: other.to_string(),
            }),
        }
    }
}

/// A deduplicated, canonically ordered set of roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Parse a list of role names, rejecting unknown ones.
    pub fn parse<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|n| n.as_ref().parse::<Role>())
            .collect()
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn remove(&mut self, role: Role) -> bool {
        self.0.remove(&role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Roles present in either set.
    pub fn union(&self, other: &RoleSet) -> RoleSet {
        Self(self.0.union(&other.0).copied().collect())
    }

    /// Roles in `self` that are not in `other`.
    pub fn difference(&self, other: &RoleSet) -> RoleSet {
        Self(self.0.difference(&other.0).copied().collect())
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_aliases() {
        assert_eq!("PHP".parse::<Role>().unwrap(), Role::Php);
        assert_eq!("docs".parse::<Role>().unwrap(), Role::Doc);
        assert_eq!(" tests ".parse::<Role>().unwrap(), Role::Test);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "cgi".parse::<Role>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownRole {
                name: "cgi".into()
            }
        );
    }

    #[test]
    fn set_is_canonically_ordered_and_deduplicated() {
        let set = RoleSet::parse(["www", "php", "test", "php"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "php,test,www");
    }

    #[test]
    fn union_and_difference() {
        let active = RoleSet::from([Role::Php]);
        let requested = RoleSet::from([Role::Php, Role::Test]);

        assert_eq!(active.union(&requested), RoleSet::from([Role::Php, Role::Test]));
        assert_eq!(requested.difference(&active), RoleSet::from([Role::Test]));
    }
}
