//! Monotonic identifiers and the sequence allocator
//!
//! Policy and violation ids come from owned [`Sequence`] allocators injected
//! into the stores that create records. A sequence only ever moves forward,
//! and a store advances it exactly once per successful creation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a policy, assigned monotonically at creation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PolicyId(u64);

impl PolicyId {
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a violation record, assigned monotonically at recording
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ViolationId(u64);

impl ViolationId {
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViolationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id allocator.
///
/// `allocate` must only be called after every precondition of the creating
/// operation has passed, so a failed operation never consumes an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    next: u64,
}

impl Sequence {
    /// Create a sequence whose first allocated id is `first`
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Allocate the next id, advancing the sequence
    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next allocation would return, without advancing
    pub const fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
