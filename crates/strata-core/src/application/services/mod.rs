//! Application services - orchestrate use cases.
//!
//! `ComponentService` is split by use case: provisioning, upgrading and
//! reclaiming unused roles each live in their own file.

mod component_service;
mod provision;
mod reclaim;
mod upgrade;

pub use component_service::{ComponentService, ComponentStatus, TYPE_KEY, VERSION_KEY};
pub use reclaim::RemovalOutcome;
pub use upgrade::UpgradeOutcome;
