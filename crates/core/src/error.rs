//! The error taxonomy surfaced to callers
//!
//! Every public operation returns either a success payload or one of these
//! discriminated codes. Internal predicates return plain booleans; only the
//! public operations translate "false" or "missing" into an error, and they
//! do so in the fixed precondition order of each operation so the reported
//! code reflects the first violated precondition.

use thiserror::Error;

use crate::identity::Identity;
use crate::ids::PolicyId;

/// Errors surfaced by gatekeeper operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplianceError {
    #[error("Caller is not authorized for this operation")]
    NotAuthorized,

    #[error("Policy not found or inactive: {0}")]
    PolicyNotFound(PolicyId),

    #[error("Compliance level {0} is invalid or insufficient")]
    InvalidComplianceLevel(u8),

    #[error("Identity does not meet policy requirements: {0}")]
    UserNotCompliant(Identity),

    #[error("Validity window has passed for policy {0}")]
    PolicyExpired(PolicyId),

    #[error("Violation count {count} exceeds allowed maximum {max}")]
    ThresholdExceeded { count: u32, max: u32 },

    #[error("Compliance record already exists for identity: {0}")]
    AlreadyExists(Identity),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("No compliance record for identity: {0}")]
    RecordNotFound(Identity),
}

impl ComplianceError {
    /// Stable machine-readable code for external consumers.
    ///
    /// These strings are part of the public contract and must not change.
    pub fn code(&self) -> &'static str {
        match self {
            ComplianceError::NotAuthorized => "NOT_AUTHORIZED",
            ComplianceError::PolicyNotFound(_) => "POLICY_NOT_FOUND",
            ComplianceError::InvalidComplianceLevel(_) => "INVALID_COMPLIANCE_LEVEL",
            ComplianceError::UserNotCompliant(_) => "USER_NOT_COMPLIANT",
            ComplianceError::PolicyExpired(_) => "POLICY_EXPIRED",
            ComplianceError::ThresholdExceeded { .. } => "THRESHOLD_EXCEEDED",
            ComplianceError::AlreadyExists(_) => "ALREADY_EXISTS",
            ComplianceError::InvalidParameter(_) => "INVALID_PARAMETER",
            ComplianceError::RecordNotFound(_) => "RECORD_NOT_FOUND",
        }
    }
}

/// Result type for gatekeeper operations
pub type ComplianceResult<T> = Result<T, ComplianceError>;
