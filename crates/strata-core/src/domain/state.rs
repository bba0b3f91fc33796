use std::fmt;

use serde::Serialize;

/// Generation of on-disk layout found in a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentState {
    /// Nothing of any component kind lives here.
    Empty,
    /// Something lives here, but not a generation this kind understands.
    Incompatible,
    /// Recorded version is older than the latest generation.
    NeedsUpgrade,
    /// Recorded version is the latest generation.
    UpToDate,
}

impl ComponentState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Incompatible => "incompatible",
            Self::NeedsUpgrade => "needs-upgrade",
            Self::UpToDate => "up-to-date",
        }
    }

    /// Whether the directory holds a component this kind can work with.
    pub const fn is_managed(self) -> bool {
        matches!(self, Self::NeedsUpgrade | Self::UpToDate)
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the persisted marker says, as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMarker {
    /// No properties store exists.
    Missing { has_canonical_artifacts: bool },
    /// A properties store exists; raw values of the two marker keys.
    Recorded {
        component_type: Option<String>,
        version: Option<String>,
    },
}

impl VersionMarker {
    /// Whether provisioning of `expected_type` started here but never
    /// recorded a version.
    pub fn is_provisioning(&self, expected_type: &str) -> bool {
        matches!(
            self,
            Self::Recorded { component_type: Some(t), version: None } if t == expected_type
        )
    }
}

/// Outcome of classifying a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub state: ComponentState,
    pub recorded_version: Option<u32>,
    /// Why the directory was judged incompatible.
    pub reason: Option<String>,
}

impl Classification {
    fn incompatible(reason: impl Into<String>, recorded_version: Option<u32>) -> Self {
        Self {
            state: ComponentState::Incompatible,
            recorded_version,
            reason: Some(reason.into()),
        }
    }
}

/// Classify a marker. Pure: same marker, same answer.
pub fn classify(marker: &VersionMarker, expected_type: &str, latest: u32) -> Classification {
    let (component_type, version) = match marker {
        VersionMarker::Missing {
            has_canonical_artifacts: false,
        } => {
            return Classification {
                state: ComponentState::Empty,
                recorded_version: None,
                reason: None,
            };
        }
        VersionMarker::Missing {
            has_canonical_artifacts: true,
        } => {
            return Classification::incompatible(
                "component artifacts found but no version marker",
                None,
            );
        }
        VersionMarker::Recorded {
            component_type,
            version,
        } => (component_type.as_deref(), version.as_deref()),
    };

    match component_type {
        Some(t) if t == expected_type => {}
        Some(other) => {
            return Classification::incompatible(
                format!("component type is '{other}', expected '{expected_type}'"),
                None,
            );
        }
        None => return Classification::incompatible("no component type recorded", None),
    }

    let Some(raw) = version else {
        return Classification::incompatible(
            "no component version recorded; provisioning may not have finished",
            None,
        );
    };

    let Ok(version) = raw.trim().parse::<u32>() else {
        return Classification::incompatible(format!("unreadable component version '{raw}'"), None);
    };

    match version {
        0 => Classification::incompatible("component version 0 is not a valid generation", Some(0)),
        v if v > latest => Classification::incompatible(
            format!("component version {v} is newer than the latest known version {latest}"),
            Some(v),
        ),
        v if v < latest => Classification {
            state: ComponentState::NeedsUpgrade,
            recorded_version: Some(v),
            reason: None,
        },
        v => Classification {
            state: ComponentState::UpToDate,
            recorded_version: Some(v),
            reason: None,
        },
    }
}
