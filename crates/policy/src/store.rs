//! Policy creation and lookup

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gatekeeper_access::AccessRegistry;
use gatekeeper_core::{
    ComplianceError, ComplianceLevel, ComplianceResult, Height, Identity, Limits, PolicyId,
    Sequence,
};

use crate::policy::{Policy, PolicyDraft};

/// Holds policy definitions, keyed by monotonically assigned id.
///
/// Policies are never deleted or updated; the id sequence advances exactly
/// once per successful creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyStore {
    policies: HashMap<PolicyId, Policy>,
    ids: Sequence,
    total_created: u64,
}

impl PolicyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy from `draft`.
    ///
    /// Preconditions, in order, each a distinct failure: caller holds write
    /// privilege, required level is a valid tier, duration fits the maximum
    /// window, the violation ceiling fits the system cap, and the name is
    /// non-empty and bounded. No counter moves and no record is written
    /// unless every precondition passes.
    pub fn create_policy(
        &mut self,
        access: &AccessRegistry,
        caller: &Identity,
        draft: PolicyDraft,
        limits: &Limits,
        now: Height,
    ) -> ComplianceResult<PolicyId> {
        if !access.is_writer(caller) {
            return Err(ComplianceError::NotAuthorized);
        }
        let required_level = ComplianceLevel::try_from(draft.required_level)?;
        if draft.duration > limits.max_window {
            return Err(ComplianceError::InvalidParameter(
                "policy duration exceeds maximum window",
            ));
        }
        if draft.max_violations > limits.max_violation_count {
            return Err(ComplianceError::InvalidParameter(
                "violation ceiling exceeds system cap",
            ));
        }
        if draft.name.is_empty() || draft.name.len() > limits.max_policy_name_len {
            return Err(ComplianceError::InvalidParameter(
                "policy name empty or too long",
            ));
        }

        let id = PolicyId::new(self.ids.allocate());
        let policy = Policy {
            id,
            name: draft.name,
            required_level,
            expiration_height: now.saturating_add(draft.duration),
            active: true,
            min_reputation: draft.min_reputation,
            max_violations: draft.max_violations,
            created_by: caller.clone(),
            created_at: now,
        };

        tracing::debug!(
            policy = %id,
            name = %policy.name,
            level = %required_level,
            expires = %policy.expiration_height,
            "Policy created"
        );
        self.policies.insert(id, policy);
        self.total_created += 1;
        Ok(id)
    }

    /// Look up a policy. Absent ids are `None`, never an error.
    pub fn get(&self, id: PolicyId) -> Option<&Policy> {
        self.policies.get(&id)
    }

    /// False when the policy does not exist, else its validity at `now`
    pub fn is_policy_active(&self, id: PolicyId, now: Height) -> bool {
        self.policies
            .get(&id)
            .map(|policy| policy.is_active(now))
            .unwrap_or(false)
    }

    /// The id the next creation would be assigned
    pub fn next_id(&self) -> u64 {
        self.ids.peek()
    }

    /// Number of policies ever created
    pub fn total_created(&self) -> u64 {
        self.total_created
    }
}
