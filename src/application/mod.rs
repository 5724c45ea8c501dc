//! Application services.
//!
//! - [`bootstrap`] - the step sequence that prepares a deployment root
//! - [`guidance`] - operator next steps and the inference API reference

pub mod bootstrap;
pub mod guidance;

pub use bootstrap::{Bootstrapper, DirectoryOutcome, Outcome, RunReport};
pub use guidance::Guidance;
