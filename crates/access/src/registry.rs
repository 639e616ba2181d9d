//! Administrator and officer privilege resolution

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gatekeeper_core::{ComplianceError, ComplianceResult, Height, Identity};

/// Officer privilege for one identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerGrant {
    /// Whether the grant is in force
    pub authorized: bool,
    /// Height at which the grant was recorded
    pub granted_at: Height,
}

/// Resolves administrative and officer privilege.
///
/// Lookups are default-deny: an identity with no grant is not an officer.
/// The only mutation path is [`AccessRegistry::grant_officer`], restricted
/// to the administrator - officer status cannot be revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRegistry {
    administrator: Identity,
    officers: HashMap<Identity, OfficerGrant>,
}

impl AccessRegistry {
    /// Create a registry with the deployment administrator
    pub fn new(administrator: Identity) -> Self {
        Self {
            administrator,
            officers: HashMap::new(),
        }
    }

    /// The deployment administrator
    pub fn administrator(&self) -> &Identity {
        &self.administrator
    }

    /// True iff `identity` is the deployment administrator
    pub fn is_administrator(&self, identity: &Identity) -> bool {
        *identity == self.administrator
    }

    /// True iff `identity` holds an officer grant. Absent grants are false.
    pub fn is_officer(&self, identity: &Identity) -> bool {
        self.officers
            .get(identity)
            .map(|grant| grant.authorized)
            .unwrap_or(false)
    }

    /// True iff `identity` may write to officer-gated stores
    pub fn is_writer(&self, identity: &Identity) -> bool {
        self.is_administrator(identity) || self.is_officer(identity)
    }

    /// Grant officer privilege to `target`.
    ///
    /// Only the administrator may grant. Granting twice overwrites the
    /// recorded height; there is no revocation path.
    pub fn grant_officer(
        &mut self,
        caller: &Identity,
        target: Identity,
        now: Height,
    ) -> ComplianceResult<()> {
        if !self.is_administrator(caller) {
            return Err(ComplianceError::NotAuthorized);
        }

        tracing::debug!(officer = %target, height = %now, "Officer grant recorded");
        self.officers.insert(
            target,
            OfficerGrant {
                authorized: true,
                granted_at: now,
            },
        );
        Ok(())
    }

    /// Number of granted officers
    pub fn officer_count(&self) -> usize {
        self.officers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Identity {
        Identity::new("ADMIN").unwrap()
    }

    fn officer() -> Identity {
        Identity::new("OFFICER-1").unwrap()
    }

    #[test]
    fn test_administrator_recognized() {
        let registry = AccessRegistry::new(admin());
        assert!(registry.is_administrator(&admin()));
        assert!(!registry.is_administrator(&officer()));
    }

    #[test]
    fn test_absent_grant_is_not_officer() {
        let registry = AccessRegistry::new(admin());
        assert!(!registry.is_officer(&officer()));
        assert!(!registry.is_writer(&officer()));
    }

    #[test]
    fn test_grant_officer() {
        let mut registry = AccessRegistry::new(admin());
        registry
            .grant_officer(&admin(), officer(), Height::new(5))
            .unwrap();

        assert!(registry.is_officer(&officer()));
        assert!(registry.is_writer(&officer()));
        assert_eq!(registry.officer_count(), 1);
    }

    #[test]
    fn test_non_administrator_cannot_grant() {
        let mut registry = AccessRegistry::new(admin());
        let result = registry.grant_officer(&officer(), officer(), Height::new(5));

        assert_eq!(result, Err(ComplianceError::NotAuthorized));
        assert!(!registry.is_officer(&officer()));
    }

    #[test]
    fn test_officer_is_not_administrator() {
        let mut registry = AccessRegistry::new(admin());
        registry
            .grant_officer(&admin(), officer(), Height::new(5))
            .unwrap();

        assert!(!registry.is_administrator(&officer()));
    }

    #[test]
    fn test_administrator_is_writer_without_grant() {
        let registry = AccessRegistry::new(admin());
        assert!(registry.is_writer(&admin()));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut registry = AccessRegistry::new(admin());
        registry
            .grant_officer(&admin(), officer(), Height::new(5))
            .unwrap();

        let json = serde_json::to_string(&registry).unwrap();
        let parsed: AccessRegistry = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_officer(&officer()));
        assert_eq!(parsed.administrator(), &admin());
    }
}
