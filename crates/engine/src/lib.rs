//! Gatekeeper Evaluation Engine
//!
//! Composes the access, policy, identity, violation, and approval stores
//! into two read-only operations:
//!
//! - [`ComplianceGate::verify_compliance`] - the lightweight query: is the
//!   policy live and does the identity meet its general requirements?
//! - [`ComplianceGate::enforce_with_approval`] - the full enforcement
//!   decision: ten sequential stages combining policy validity, identity
//!   standing, a caller-tunable reputation margin, and a live discretionary
//!   approval.
//!
//! The engine only reads; every write flows through the owning store.
//! Consumers place `enforce_with_approval` at the entry of a regulated
//! operation and abort on any non-success result.

pub mod config;
pub mod gate;

pub use config::GateConfig;
pub use gate::{ComplianceGate, GateStats};
