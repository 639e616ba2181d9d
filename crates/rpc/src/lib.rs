//! Gatekeeper RPC - CLI orchestrator
//!
//! This crate provides the CLI binary and command orchestration over a
//! JSON state snapshot.

pub mod commands;
pub mod context;

pub use context::GateContext;
