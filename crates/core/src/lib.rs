//! Gatekeeper Core - Domain types
//!
//! This crate contains the fundamental types used across Gatekeeper:
//! - `Identity`: Opaque, host-authenticated principal identifier
//! - `Height`: Logical clock value supplied by the host per invocation
//! - `ComplianceLevel`: Verified trust tier (0-4)
//! - `ComplianceError`: The stable error taxonomy surfaced to callers
//! - `Sequence`: Monotonic id allocator for policy and violation ids
//! - `Limits`: Configurable system-wide bounds

pub mod error;
pub mod height;
pub mod identity;
pub mod ids;
pub mod level;
pub mod limits;

pub use error::{ComplianceError, ComplianceResult};
pub use height::Height;
pub use identity::Identity;
pub use ids::{PolicyId, Sequence, ViolationId};
pub use level::ComplianceLevel;
pub use limits::Limits;
