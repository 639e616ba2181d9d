//! Identity - Opaque principal identifier
//!
//! The host environment authenticates callers; this crate only carries the
//! identifier around. Identities are non-empty bounded strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum identifier length accepted from the host
pub const MAX_IDENTITY_LEN: usize = 128;

/// Errors that can occur when constructing identities
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity cannot be empty")]
    Empty,

    #[error("Identity too long (max {MAX_IDENTITY_LEN} chars): {0}")]
    TooLong(String),
}

/// An opaque, host-authenticated principal.
///
/// # Invariant
/// The inner string is non-empty and at most [`MAX_IDENTITY_LEN`] bytes.
///
/// # Example
/// ```
/// use gatekeeper_core::Identity;
///
/// let alice: Identity = "ALICE".parse().unwrap();
/// assert_eq!(alice.as_str(), "ALICE");
///
/// let empty = "".parse::<Identity>();
/// assert!(empty.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Create a new identity, rejecting empty or oversized identifiers.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        if value.is_empty() {
            Err(IdentityError::Empty)
        } else if value.len() > MAX_IDENTITY_LEN {
            Err(IdentityError::TooLong(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Get the inner identifier
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}
