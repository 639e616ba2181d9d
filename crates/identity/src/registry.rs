//! Registration and officer-gated updates

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gatekeeper_access::AccessRegistry;
use gatekeeper_core::{
    ComplianceError, ComplianceLevel, ComplianceResult, Height, Identity, Limits,
};

use crate::record::ComplianceRecord;

/// Reputation assigned to every newly registered identity
pub const STARTER_REPUTATION: u32 = 50;

/// One compliance record per identity.
///
/// Re-registration is rejected so accumulated history (violations,
/// reputation) cannot be reset by creating a fresh record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityRegistry {
    records: HashMap<Identity, ComplianceRecord>,
}

impl IdentityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new identity with starter standing.
    ///
    /// The starter record carries the Basic tier, reputation
    /// [`STARTER_REPUTATION`], no violations, and a verification window of
    /// `limits.default_verification_window` ticks.
    pub fn register(
        &mut self,
        identity: Identity,
        limits: &Limits,
        now: Height,
    ) -> ComplianceResult<()> {
        if self.records.contains_key(&identity) {
            return Err(ComplianceError::AlreadyExists(identity));
        }

        let record = ComplianceRecord {
            level: ComplianceLevel::Basic,
            reputation: STARTER_REPUTATION,
            violation_count: 0,
            last_verified: now,
            verification_expiry: now.saturating_add(limits.default_verification_window),
            blacklisted: false,
        };

        tracing::debug!(identity = %identity, height = %now, "Identity registered");
        self.records.insert(identity, record);
        Ok(())
    }

    /// Overwrite an identity's level, reputation, and verification window.
    ///
    /// Preconditions, in order: caller holds write privilege, `new_level`
    /// is a valid tier, `verification_window` fits the maximum window, and
    /// the record exists. The blacklist flag and violation count are left
    /// untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn update_compliance(
        &mut self,
        access: &AccessRegistry,
        caller: &Identity,
        identity: &Identity,
        new_level: u8,
        new_reputation: u32,
        verification_window: u64,
        limits: &Limits,
        now: Height,
    ) -> ComplianceResult<()> {
        if !access.is_writer(caller) {
            return Err(ComplianceError::NotAuthorized);
        }
        let level = ComplianceLevel::try_from(new_level)?;
        if verification_window > limits.max_window {
            return Err(ComplianceError::InvalidParameter(
                "verification window exceeds maximum",
            ));
        }
        let record = self
            .records
            .get_mut(identity)
            .ok_or_else(|| ComplianceError::RecordNotFound(identity.clone()))?;

        record.level = level;
        record.reputation = new_reputation;
        record.last_verified = now;
        record.verification_expiry = now.saturating_add(verification_window);

        tracing::debug!(
            identity = %identity,
            level = %level,
            reputation = new_reputation,
            height = %now,
            "Compliance standing updated"
        );
        Ok(())
    }

    /// Bump an identity's violation count by one.
    ///
    /// Invoked by the violation ledger as the correlated side effect of a
    /// successful recording. Returns false when the identity has no record,
    /// in which case nothing is mutated. The count is deliberately not
    /// capped here: the ceiling is a per-policy comparison at evaluation
    /// time, and a capped counter would disagree with the append-only
    /// ledger.
    pub fn note_violation(&mut self, subject: &Identity) -> bool {
        match self.records.get_mut(subject) {
            Some(record) => {
                record.violation_count = record.violation_count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Look up a record. Absent identities are `None`, never an error.
    pub fn get(&self, identity: &Identity) -> Option<&ComplianceRecord> {
        self.records.get(identity)
    }

    /// Number of registered identities
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no identity is registered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
