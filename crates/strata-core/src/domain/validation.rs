use crate::domain::{error::DomainError, role::RoleSet};

/// Centralized domain validation.
///
/// Everything here runs before the first side effect of an operation.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_roles(roles: &RoleSet) -> Result<(), DomainError> {
        if roles.is_empty() {
            return Err(DomainError::EmptyRoleSet);
        }
        Ok(())
    }

    /// Check an upgrade request against the latest generation.
    ///
    /// `from_override` must name a generation that still has a step after
    /// it; `target` must be a known generation no older than the start.
    pub fn validate_versions(
        start: u32,
        from_override: Option<u32>,
        target: u32,
        latest: u32,
    ) -> Result<(), DomainError> {
        if let Some(from) = from_override {
            if from == 0 || from >= latest {
                return Err(DomainError::InvalidVersion {
                    version: from,
                    reason: format!("starting version must be between 1 and {}", latest - 1),
                });
            }
        }

        if target == 0 || target > latest {
            return Err(DomainError::InvalidVersion {
                version: target,
                reason: format!("target version must be between 1 and {latest}"),
            });
        }

        if target < start {
            return Err(DomainError::InvalidVersion {
                version: target,
                reason: format!("target is older than starting version {start}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;

    #[test]
    fn empty_role_set_is_rejected() {
        assert_eq!(
            DomainValidator::validate_roles(&RoleSet::default()),
            Err(DomainError::EmptyRoleSet)
        );
        assert!(DomainValidator::validate_roles(&RoleSet::from([Role::Php])).is_ok());
    }

    #[test]
    fn version_bounds() {
        assert!(DomainValidator::validate_versions(9, None, 12, 12).is_ok());
        assert!(DomainValidator::validate_versions(3, Some(3), 12, 12).is_ok());
        assert!(DomainValidator::validate_versions(12, Some(0), 12, 12).is_err());
        assert!(DomainValidator::validate_versions(12, Some(12), 12, 12).is_err());
        assert!(DomainValidator::validate_versions(9, None, 13, 12).is_err());
        assert!(DomainValidator::validate_versions(9, None, 5, 12).is_err());
    }
}
