//! Gatekeeper Access Control Registry
//!
//! Resolves whether a caller holds administrative or officer privilege.
//! The administrator is a single identity fixed at deployment; officer
//! status is granted by the administrator and never revoked.

mod registry;

pub use registry::{AccessRegistry, OfficerGrant};
