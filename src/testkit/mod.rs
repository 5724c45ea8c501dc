//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`runtime`] - [`ScriptedRuntime`](runtime::ScriptedRuntime), a
//!   [`ContainerRuntime`](crate::port::ContainerRuntime) that records calls
//!   and fails on demand.
//! - [`deployment`] - Seeds a deployment root with a manifest and template.

pub mod deployment;
pub mod runtime;
