//! The compliance gate - store wiring and the two evaluation operations

use serde::{Deserialize, Serialize};

use gatekeeper_access::AccessRegistry;
use gatekeeper_approval::{Approval, ApprovalRegistry};
use gatekeeper_core::{
    ComplianceError, ComplianceResult, Height, Identity, Limits, PolicyId, ViolationId,
};
use gatekeeper_identity::{ComplianceRecord, IdentityRegistry};
use gatekeeper_policy::{Policy, PolicyDraft, PolicyStore};
use gatekeeper_violations::{Violation, ViolationLedger};

use crate::config::GateConfig;

/// Counters across the stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStats {
    pub officers: usize,
    pub policies_created: u64,
    pub identities_registered: usize,
    pub violations_recorded: u64,
    pub approvals_recorded: usize,
}

/// Wires the five stores together behind one surface.
///
/// Writes pass through to the owning store with the access registry and
/// limits injected; the evaluation operations only read. The whole gate
/// serializes as one state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceGate {
    access: AccessRegistry,
    policies: PolicyStore,
    identities: IdentityRegistry,
    violations: ViolationLedger,
    approvals: ApprovalRegistry,
    limits: Limits,
}

impl ComplianceGate {
    /// Create a gate from deployment configuration
    pub fn new(config: GateConfig) -> Self {
        Self {
            access: AccessRegistry::new(config.administrator),
            policies: PolicyStore::new(),
            identities: IdentityRegistry::new(),
            violations: ViolationLedger::new(),
            approvals: ApprovalRegistry::new(),
            limits: config.limits,
        }
    }

    /// Create a gate with default limits (for tests and tooling)
    pub fn with_administrator(administrator: Identity) -> Self {
        Self::new(GateConfig::new(administrator))
    }

    // === Write operations (pass-through to the owning store) ===

    /// Grant officer privilege. Administrator only.
    pub fn grant_officer(
        &mut self,
        caller: &Identity,
        target: Identity,
        now: Height,
    ) -> ComplianceResult<()> {
        self.access.grant_officer(caller, target, now)
    }

    /// Create a policy. Administrator or officer only.
    pub fn create_policy(
        &mut self,
        caller: &Identity,
        draft: PolicyDraft,
        now: Height,
    ) -> ComplianceResult<PolicyId> {
        self.policies
            .create_policy(&self.access, caller, draft, &self.limits, now)
    }

    /// Register an identity with starter standing. Open to anyone, once.
    pub fn register_identity(&mut self, identity: Identity, now: Height) -> ComplianceResult<()> {
        self.identities.register(identity, &self.limits, now)
    }

    /// Overwrite an identity's standing. Administrator or officer only.
    #[allow(clippy::too_many_arguments)]
    pub fn update_compliance(
        &mut self,
        caller: &Identity,
        identity: &Identity,
        new_level: u8,
        new_reputation: u32,
        verification_window: u64,
        now: Height,
    ) -> ComplianceResult<()> {
        self.identities.update_compliance(
            &self.access,
            caller,
            identity,
            new_level,
            new_reputation,
            verification_window,
            &self.limits,
            now,
        )
    }

    /// Record a violation. Administrator or officer only.
    pub fn record_violation(
        &mut self,
        caller: &Identity,
        subject: &Identity,
        policy_id: PolicyId,
        kind: impl Into<String>,
        severity: u8,
        now: Height,
    ) -> ComplianceResult<ViolationId> {
        self.violations.record(
            &self.access,
            &self.policies,
            &mut self.identities,
            caller,
            subject,
            policy_id,
            kind,
            severity,
            now,
        )
    }

    /// Grant a discretionary approval. Administrator or officer only.
    pub fn approve_for_policy(
        &mut self,
        caller: &Identity,
        subject: &Identity,
        policy_id: PolicyId,
        duration: u64,
        now: Height,
    ) -> ComplianceResult<()> {
        self.approvals.approve(
            &self.access,
            &self.policies,
            &self.identities,
            caller,
            subject,
            policy_id,
            duration,
            &self.limits,
            now,
        )
    }

    // === Evaluation operations (read-only) ===

    /// Whether `identity` meets `policy_id`'s general requirements at `now`.
    ///
    /// A pure conjunction: a missing policy or record makes it false, never
    /// an error. Errors belong to the public operations below.
    pub fn meets_policy_requirements(
        &self,
        identity: &Identity,
        policy_id: PolicyId,
        now: Height,
    ) -> bool {
        let Some(policy) = self.policies.get(policy_id) else {
            return false;
        };
        let Some(record) = self.identities.get(identity) else {
            return false;
        };
        policy.is_satisfied_by(record, now)
    }

    /// The lightweight compliance query.
    ///
    /// Succeeds iff the policy is live and the identity meets its general
    /// requirements. Callable without any discretionary approval.
    pub fn verify_compliance(
        &self,
        identity: &Identity,
        policy_id: PolicyId,
        now: Height,
    ) -> ComplianceResult<()> {
        let result = self.verify_stages(identity, policy_id, now);
        self.trace_decision("verify", identity, policy_id, now, &result);
        result
    }

    fn verify_stages(
        &self,
        identity: &Identity,
        policy_id: PolicyId,
        now: Height,
    ) -> ComplianceResult<()> {
        if !self.policies.is_policy_active(policy_id, now) {
            return Err(ComplianceError::PolicyNotFound(policy_id));
        }
        if !self.meets_policy_requirements(identity, policy_id, now) {
            return Err(ComplianceError::UserNotCompliant(identity.clone()));
        }
        Ok(())
    }

    /// The full enforcement decision.
    ///
    /// Strictly stronger than [`verify_compliance`](Self::verify_compliance):
    /// it additionally demands a live discretionary approval and a
    /// reputation margin of `reputation_boost` above the policy's minimum.
    /// Evaluation is strictly sequential and stops at the first failing
    /// stage, so the reported code names the first violated precondition.
    pub fn enforce_with_approval(
        &self,
        identity: &Identity,
        policy_id: PolicyId,
        reputation_boost: u32,
        now: Height,
    ) -> ComplianceResult<()> {
        let result = self.enforce_stages(identity, policy_id, reputation_boost, now);
        self.trace_decision("enforce", identity, policy_id, now, &result);
        result
    }

    fn enforce_stages(
        &self,
        identity: &Identity,
        policy_id: PolicyId,
        reputation_boost: u32,
        now: Height,
    ) -> ComplianceResult<()> {
        // 1. Policy record must exist
        let Some(policy) = self.policies.get(policy_id) else {
            return Err(ComplianceError::PolicyNotFound(policy_id));
        };

        // 2. Identity compliance record must exist
        let Some(record) = self.identities.get(identity) else {
            return Err(ComplianceError::UserNotCompliant(identity.clone()));
        };

        // 3. Policy must be live
        if !policy.is_active(now) {
            return Err(ComplianceError::PolicyExpired(policy_id));
        }

        // 4. Identity must not be blacklisted
        if record.blacklisted {
            return Err(ComplianceError::UserNotCompliant(identity.clone()));
        }

        // 5. Verification must not have lapsed
        if !record.is_verification_current(now) {
            return Err(ComplianceError::PolicyExpired(policy_id));
        }

        // 6. Tier must reach the policy's requirement
        if record.level < policy.required_level {
            return Err(ComplianceError::InvalidComplianceLevel(record.level.as_u8()));
        }

        // 7. Reputation must clear the minimum plus the caller's margin
        let required_reputation = policy.min_reputation.saturating_add(reputation_boost);
        if record.reputation < required_reputation {
            return Err(ComplianceError::UserNotCompliant(identity.clone()));
        }

        // 8. Violations must fit the policy's ceiling
        if record.violation_count > policy.max_violations {
            return Err(ComplianceError::ThresholdExceeded {
                count: record.violation_count,
                max: policy.max_violations,
            });
        }

        // 9. A discretionary approval must exist and be in force
        let Some(approval) = self.approvals.get(identity, policy_id) else {
            return Err(ComplianceError::NotAuthorized);
        };
        if !approval.approved {
            return Err(ComplianceError::NotAuthorized);
        }

        // 10. The approval must not have lapsed
        if approval.expires_at < now {
            return Err(ComplianceError::PolicyExpired(policy_id));
        }

        Ok(())
    }

    fn trace_decision(
        &self,
        operation: &'static str,
        identity: &Identity,
        policy_id: PolicyId,
        now: Height,
        result: &ComplianceResult<()>,
    ) {
        match result {
            Ok(()) => {
                tracing::debug!(operation, identity = %identity, policy = %policy_id, height = %now, "Decision: pass");
            }
            Err(e) => {
                tracing::debug!(
                    operation,
                    identity = %identity,
                    policy = %policy_id,
                    height = %now,
                    code = e.code(),
                    "Decision: reject"
                );
            }
        }
    }

    // === Accessors ===

    /// The access control registry
    pub fn access(&self) -> &AccessRegistry {
        &self.access
    }

    /// Look up a policy
    pub fn policy(&self, id: PolicyId) -> Option<&Policy> {
        self.policies.get(id)
    }

    /// False when the policy does not exist, else its validity at `now`
    pub fn is_policy_active(&self, id: PolicyId, now: Height) -> bool {
        self.policies.is_policy_active(id, now)
    }

    /// Look up an identity's compliance record
    pub fn compliance_record(&self, identity: &Identity) -> Option<&ComplianceRecord> {
        self.identities.get(identity)
    }

    /// All violations recorded against `subject`, in id order
    pub fn violations_for(&self, subject: &Identity) -> Vec<&Violation> {
        self.violations.for_subject(subject)
    }

    /// Look up the approval for a pair
    pub fn approval(&self, subject: &Identity, policy_id: PolicyId) -> Option<&Approval> {
        self.approvals.get(subject, policy_id)
    }

    /// The configured limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Counters across the stores
    pub fn stats(&self) -> GateStats {
        GateStats {
            officers: self.access.officer_count(),
            policies_created: self.policies.total_created(),
            identities_registered: self.identities.len(),
            violations_recorded: self.violations.total_recorded(),
            approvals_recorded: self.approvals.len(),
        }
    }
}
