//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod filesystem;
pub mod runtime;
