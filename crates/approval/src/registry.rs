//! Granting and resolving discretionary approvals

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gatekeeper_access::AccessRegistry;
use gatekeeper_core::{
    ComplianceError, ComplianceResult, Height, Identity, Limits, PolicyId,
};
use gatekeeper_identity::IdentityRegistry;
use gatekeeper_policy::PolicyStore;

use crate::grant::Approval;

/// Approvals keyed by (identity, policy id).
///
/// A pair holds at most one approval; granting again overwrites. Lookups
/// are default-deny: an absent approval is simply not live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalRegistry {
    grants: HashMap<Identity, HashMap<PolicyId, Approval>>,
}

impl ApprovalRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `subject` a discretionary approval for `policy_id`.
    ///
    /// Preconditions, in order: caller holds write privilege, the policy is
    /// active at `now`, the approval window fits the maximum, and the
    /// subject already satisfies the policy's general requirements. Nothing
    /// is written when any precondition fails.
    #[allow(clippy::too_many_arguments)]
    pub fn approve(
        &mut self,
        access: &AccessRegistry,
        policies: &PolicyStore,
        identities: &IdentityRegistry,
        caller: &Identity,
        subject: &Identity,
        policy_id: PolicyId,
        duration: u64,
        limits: &Limits,
        now: Height,
    ) -> ComplianceResult<()> {
        if !access.is_writer(caller) {
            return Err(ComplianceError::NotAuthorized);
        }
        if !policies.is_policy_active(policy_id, now) {
            return Err(ComplianceError::PolicyNotFound(policy_id));
        }
        if duration > limits.max_window {
            return Err(ComplianceError::InvalidParameter(
                "approval duration exceeds maximum window",
            ));
        }
        let satisfied = policies
            .get(policy_id)
            .zip(identities.get(subject))
            .map(|(policy, record)| policy.is_satisfied_by(record, now))
            .unwrap_or(false);
        if !satisfied {
            return Err(ComplianceError::UserNotCompliant(subject.clone()));
        }

        let approval = Approval {
            approved: true,
            approved_at: now,
            approved_by: caller.clone(),
            expires_at: now.saturating_add(duration),
        };

        tracing::debug!(
            subject = %subject,
            policy = %policy_id,
            expires = %approval.expires_at,
            "Approval granted"
        );
        self.grants
            .entry(subject.clone())
            .or_default()
            .insert(policy_id, approval);
        Ok(())
    }

    /// Look up the approval for a pair. Absent pairs are `None`.
    pub fn get(&self, subject: &Identity, policy_id: PolicyId) -> Option<&Approval> {
        self.grants.get(subject)?.get(&policy_id)
    }

    /// Whether a live approval covers the pair at `now`. Absent is false.
    pub fn is_live(&self, subject: &Identity, policy_id: PolicyId, now: Height) -> bool {
        self.get(subject, policy_id)
            .map(|approval| approval.is_live(now))
            .unwrap_or(false)
    }

    /// Number of recorded approvals across all pairs
    pub fn len(&self) -> usize {
        self.grants.values().map(|grants| grants.len()).sum()
    }

    /// Whether no approval is recorded
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeeper_policy::PolicyDraft;

    fn admin() -> Identity {
        Identity::new("ADMIN").unwrap()
    }

    fn alice() -> Identity {
        Identity::new("ALICE").unwrap()
    }

    struct Fixture {
        access: AccessRegistry,
        policies: PolicyStore,
        identities: IdentityRegistry,
        approvals: ApprovalRegistry,
        limits: Limits,
        policy_id: PolicyId,
    }

    fn setup() -> Fixture {
        let access = AccessRegistry::new(admin());
        let mut policies = PolicyStore::new();
        let limits = Limits::default();
        let policy_id = policies
            .create_policy(
                &access,
                &admin(),
                PolicyDraft {
                    name: "custody-transfer".to_string(),
                    required_level: 1,
                    duration: 1_000,
                    min_reputation: 40,
                    max_violations: 3,
                },
                &limits,
                Height::ZERO,
            )
            .unwrap();

        Fixture {
            access,
            policies,
            identities: IdentityRegistry::new(),
            approvals: ApprovalRegistry::new(),
            limits,
            policy_id,
        }
    }

    #[test]
    fn test_approve_compliant_subject() {
        let mut fx = setup();
        fx.identities
            .register(alice(), &fx.limits, Height::ZERO)
            .unwrap();

        fx.approvals
            .approve(
                &fx.access,
                &fx.policies,
                &fx.identities,
                &admin(),
                &alice(),
                fx.policy_id,
                100,
                &fx.limits,
                Height::new(10),
            )
            .unwrap();

        let approval = fx.approvals.get(&alice(), fx.policy_id).unwrap();
        assert!(approval.approved);
        assert_eq!(approval.approved_at, Height::new(10));
        assert_eq!(approval.approved_by, admin());
        assert_eq!(approval.expires_at, Height::new(110));
        assert!(fx.approvals.is_live(&alice(), fx.policy_id, Height::new(110)));
        assert!(!fx.approvals.is_live(&alice(), fx.policy_id, Height::new(111)));
    }

    #[test]
    fn test_noncompliant_subject_rejected_and_nothing_written() {
        let mut fx = setup();
        // ALICE never registered: general requirements cannot hold.
        let result = fx.approvals.approve(
            &fx.access,
            &fx.policies,
            &fx.identities,
            &admin(),
            &alice(),
            fx.policy_id,
            100,
            &fx.limits,
            Height::new(10),
        );

        assert_eq!(result, Err(ComplianceError::UserNotCompliant(alice())));
        assert!(fx.approvals.get(&alice(), fx.policy_id).is_none());
        assert!(fx.approvals.is_empty());
    }

    #[test]
    fn test_unauthorized_caller_rejected() {
        let mut fx = setup();
        fx.identities
            .register(alice(), &fx.limits, Height::ZERO)
            .unwrap();

        let result = fx.approvals.approve(
            &fx.access,
            &fx.policies,
            &fx.identities,
            &alice(),
            &alice(),
            fx.policy_id,
            100,
            &fx.limits,
            Height::new(10),
        );
        assert_eq!(result, Err(ComplianceError::NotAuthorized));
    }

    #[test]
    fn test_expired_policy_rejected() {
        let mut fx = setup();
        fx.identities
            .register(alice(), &fx.limits, Height::ZERO)
            .unwrap();

        let result = fx.approvals.approve(
            &fx.access,
            &fx.policies,
            &fx.identities,
            &admin(),
            &alice(),
            fx.policy_id,
            100,
            &fx.limits,
            Height::new(1_001),
        );
        assert_eq!(result, Err(ComplianceError::PolicyNotFound(fx.policy_id)));
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let mut fx = setup();
        fx.identities
            .register(alice(), &fx.limits, Height::ZERO)
            .unwrap();

        let result = fx.approvals.approve(
            &fx.access,
            &fx.policies,
            &fx.identities,
            &admin(),
            &alice(),
            fx.policy_id,
            fx.limits.max_window + 1,
            &fx.limits,
            Height::new(10),
        );
        assert!(matches!(result, Err(ComplianceError::InvalidParameter(_))));
    }

    #[test]
    fn test_regrant_overwrites() {
        let mut fx = setup();
        fx.identities
            .register(alice(), &fx.limits, Height::ZERO)
            .unwrap();

        fx.approvals
            .approve(
                &fx.access,
                &fx.policies,
                &fx.identities,
                &admin(),
                &alice(),
                fx.policy_id,
                50,
                &fx.limits,
                Height::new(10),
            )
            .unwrap();
        fx.approvals
            .approve(
                &fx.access,
                &fx.policies,
                &fx.identities,
                &admin(),
                &alice(),
                fx.policy_id,
                200,
                &fx.limits,
                Height::new(20),
            )
            .unwrap();

        assert_eq!(fx.approvals.len(), 1);
        let approval = fx.approvals.get(&alice(), fx.policy_id).unwrap();
        assert_eq!(approval.approved_at, Height::new(20));
        assert_eq!(approval.expires_at, Height::new(220));
    }

    #[test]
    fn test_absent_pair_is_not_live() {
        let fx = setup();
        assert!(!fx.approvals.is_live(&alice(), fx.policy_id, Height::ZERO));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut fx = setup();
        fx.identities
            .register(alice(), &fx.limits, Height::ZERO)
            .unwrap();
        fx.approvals
            .approve(
                &fx.access,
                &fx.policies,
                &fx.identities,
                &admin(),
                &alice(),
                fx.policy_id,
                100,
                &fx.limits,
                Height::new(10),
            )
            .unwrap();

        let json = serde_json::to_string(&fx.approvals).unwrap();
        let parsed: ApprovalRegistry = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_live(&alice(), fx.policy_id, Height::new(50)));
    }
}
