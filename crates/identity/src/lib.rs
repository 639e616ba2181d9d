//! Gatekeeper Identity Compliance Registry
//!
//! Per-identity standing: compliance level, reputation, violation count,
//! verification window, and blacklist flag. One record per identity,
//! created at registration and mutated only by officer-gated operations.

mod record;
mod registry;

pub use record::ComplianceRecord;
pub use registry::{IdentityRegistry, STARTER_REPUTATION};
