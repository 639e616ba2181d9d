//! Gatekeeper Violation Ledger
//!
//! Append-only record of infractions. Each entry links a policy to an
//! identity; a successful recording also bumps the identity's violation
//! counter when a compliance record exists.

mod ledger;
mod violation;

pub use ledger::ViolationLedger;
pub use violation::{Violation, SEVERITY_MAX, SEVERITY_MIN};
