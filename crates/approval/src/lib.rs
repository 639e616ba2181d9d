//! Gatekeeper Approval Registry
//!
//! Discretionary, time-bounded grants tying one identity to one policy
//! beyond what general requirements alone provide. At most one live
//! approval per (identity, policy) pair; later grants overwrite earlier
//! ones.

mod grant;
mod registry;

pub use grant::Approval;
pub use registry::ApprovalRegistry;
