//! Append-only recording of infractions

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use gatekeeper_access::AccessRegistry;
use gatekeeper_core::{
    ComplianceError, ComplianceResult, Height, Identity, PolicyId, Sequence, ViolationId,
};
use gatekeeper_identity::IdentityRegistry;
use gatekeeper_policy::PolicyStore;

use crate::violation::{Violation, SEVERITY_MAX, SEVERITY_MIN};

/// Append-only ledger of violations, keyed (subject, violation id).
///
/// The id sequence is global across subjects and advances exactly once per
/// successful recording.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationLedger {
    entries: HashMap<Identity, BTreeMap<ViolationId, Violation>>,
    ids: Sequence,
    total_recorded: u64,
}

impl ViolationLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an infraction against `subject`.
    ///
    /// Preconditions, in order: caller holds write privilege, the
    /// referenced policy exists (active or not), severity is within range.
    /// On success the entry is appended with `resolved = false` and the
    /// subject's violation counter is bumped iff a compliance record
    /// exists - a subject without a record still gets a ledger entry, and
    /// the id and total counters advance either way.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        access: &AccessRegistry,
        policies: &PolicyStore,
        identities: &mut IdentityRegistry,
        caller: &Identity,
        subject: &Identity,
        policy_id: PolicyId,
        kind: impl Into<String>,
        severity: u8,
        now: Height,
    ) -> ComplianceResult<ViolationId> {
        if !access.is_writer(caller) {
            return Err(ComplianceError::NotAuthorized);
        }
        if policies.get(policy_id).is_none() {
            return Err(ComplianceError::PolicyNotFound(policy_id));
        }
        if !(SEVERITY_MIN..=SEVERITY_MAX).contains(&severity) {
            return Err(ComplianceError::InvalidParameter(
                "severity out of range",
            ));
        }

        let id = ViolationId::new(self.ids.allocate());
        let violation = Violation {
            id,
            policy_id,
            kind: kind.into(),
            severity,
            recorded_at: now,
            resolved: false,
        };

        let counted = identities.note_violation(subject);
        if !counted {
            tracing::debug!(subject = %subject, "No compliance record for subject; counter untouched");
        }
        tracing::debug!(
            subject = %subject,
            policy = %policy_id,
            violation = %id,
            severity,
            "Violation recorded"
        );

        self.entries
            .entry(subject.clone())
            .or_default()
            .insert(id, violation);
        self.total_recorded += 1;
        Ok(id)
    }

    /// Look up one violation
    pub fn get(&self, subject: &Identity, id: ViolationId) -> Option<&Violation> {
        self.entries.get(subject)?.get(&id)
    }

    /// All violations recorded against `subject`, in id order
    pub fn for_subject(&self, subject: &Identity) -> Vec<&Violation> {
        self.entries
            .get(subject)
            .map(|entries| entries.values().collect())
            .unwrap_or_default()
    }

    /// The id the next recording would be assigned
    pub fn next_id(&self) -> u64 {
        self.ids.peek()
    }

    /// Number of violations ever recorded
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeeper_core::Limits;
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
        ledger: ViolationLedger,
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
                    name: "reporting".to_string(),
                    required_level: 1,
                    duration: 1_000,
                    min_reputation: 0,
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
            ledger: ViolationLedger::new(),
            limits,
            policy_id,
        }
    }

    #[test]
    fn test_record_violation() {
        let mut fx = setup();
        fx.identities
            .register(alice(), &fx.limits, Height::ZERO)
            .unwrap();

        let id = fx
            .ledger
            .record(
                &fx.access,
                &fx.policies,
                &mut fx.identities,
                &admin(),
                &alice(),
                fx.policy_id,
                "late-filing",
                4,
                Height::new(50),
            )
            .unwrap();

        let violation = fx.ledger.get(&alice(), id).unwrap();
        assert_eq!(violation.policy_id, fx.policy_id);
        assert_eq!(violation.kind, "late-filing");
        assert_eq!(violation.severity, 4);
        assert_eq!(violation.recorded_at, Height::new(50));
        assert!(!violation.resolved);

        assert_eq!(fx.identities.get(&alice()).unwrap().violation_count, 1);
        assert_eq!(fx.ledger.total_recorded(), 1);
    }

    #[test]
    fn test_record_without_compliance_record_still_succeeds() {
        let mut fx = setup();

        let id = fx
            .ledger
            .record(
                &fx.access,
                &fx.policies,
                &mut fx.identities,
                &admin(),
                &alice(),
                fx.policy_id,
                "unregistered-activity",
                9,
                Height::new(50),
            )
            .unwrap();

        assert!(fx.ledger.get(&alice(), id).is_some());
        assert_eq!(fx.ledger.total_recorded(), 1);
        assert!(fx.identities.get(&alice()).is_none());
    }

    #[test]
    fn test_unauthorized_caller_rejected() {
        let mut fx = setup();

        let result = fx.ledger.record(
            &fx.access,
            &fx.policies,
            &mut fx.identities,
            &alice(),
            &alice(),
            fx.policy_id,
            "late-filing",
            4,
            Height::ZERO,
        );
        assert_eq!(result, Err(ComplianceError::NotAuthorized));
        assert_eq!(fx.ledger.total_recorded(), 0);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let mut fx = setup();
        let missing = PolicyId::new(999);

        let result = fx.ledger.record(
            &fx.access,
            &fx.policies,
            &mut fx.identities,
            &admin(),
            &alice(),
            missing,
            "late-filing",
            4,
            Height::ZERO,
        );
        assert_eq!(result, Err(ComplianceError::PolicyNotFound(missing)));
    }

    #[test]
    fn test_severity_bounds() {
        let mut fx = setup();

        for severity in [0u8, 11] {
            let next_before = fx.ledger.next_id();
            let result = fx.ledger.record(
                &fx.access,
                &fx.policies,
                &mut fx.identities,
                &admin(),
                &alice(),
                fx.policy_id,
                "late-filing",
                severity,
                Height::ZERO,
            );
            assert!(matches!(result, Err(ComplianceError::InvalidParameter(_))));
            assert_eq!(fx.ledger.next_id(), next_before);
        }

        for severity in [SEVERITY_MIN, SEVERITY_MAX] {
            fx.ledger
                .record(
                    &fx.access,
                    &fx.policies,
                    &mut fx.identities,
                    &admin(),
                    &alice(),
                    fx.policy_id,
                    "late-filing",
                    severity,
                    Height::ZERO,
                )
                .unwrap();
        }
    }

    #[test]
    fn test_for_subject_in_id_order() {
        let mut fx = setup();
        fx.identities
            .register(alice(), &fx.limits, Height::ZERO)
            .unwrap();

        for kind in ["first", "second", "third"] {
            fx.ledger
                .record(
                    &fx.access,
                    &fx.policies,
                    &mut fx.identities,
                    &admin(),
                    &alice(),
                    fx.policy_id,
                    kind,
                    5,
                    Height::ZERO,
                )
                .unwrap();
        }

        let listed = fx.ledger.for_subject(&alice());
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].kind, "first");
        assert_eq!(listed[2].kind, "third");
        assert_eq!(fx.identities.get(&alice()).unwrap().violation_count, 3);
    }

    #[test]
    fn test_inactive_policy_still_referencable() {
        // Recording requires existence, not activity: an expired policy's
        // infractions can still be booked.
        let mut fx = setup();

        let result = fx.ledger.record(
            &fx.access,
            &fx.policies,
            &mut fx.identities,
            &admin(),
            &alice(),
            fx.policy_id,
            "late-filing",
            4,
            Height::new(5_000),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut fx = setup();
        fx.ledger
            .record(
                &fx.access,
                &fx.policies,
                &mut fx.identities,
                &admin(),
                &alice(),
                fx.policy_id,
                "late-filing",
                4,
                Height::ZERO,
            )
            .unwrap();

        let json = serde_json::to_string(&fx.ledger).unwrap();
        let parsed: ViolationLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_recorded(), 1);
        assert_eq!(parsed.for_subject(&alice()).len(), 1);
    }
}
