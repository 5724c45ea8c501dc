//! Modelstrap - bootstrap a Docker deployment for local language models.
//!
//! Prepares a deployment root so a containerized video-generation service
//! runs against local Hugging Face models instead of external APIs.
//!
//! # Flow
//!
//! A run walks a fixed sequence of idempotent steps and stops at the first
//! failure:
//!
//! 1. Check that the container runtime daemon is reachable
//! 2. Create `models/`, `storage/` and `storage/tasks/` with mode `0o755`
//! 3. Require the compose manifest
//! 4. Build the image with `docker compose build`
//! 5. Seed `config.toml` from `config.example.toml`, append the custom-model
//!    block unless its marker line is present, and write the model catalog
//!
//! Rerunning after fixing a failure converges on the same end state.
//!
//! # Modules
//!
//! - [`domain`] - Layout, stages, the managed config block, the model catalog
//! - [`port`] - Container runtime and filesystem traits
//! - [`adapter`] - Docker CLI and local disk implementations, plus the CLI
//! - [`application`] - The bootstrapper and operator guidance
//! - [`infrastructure`] - Settings and logging
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use modelstrap::adapter::outbound::{DockerCli, LocalFs};
//! use modelstrap::application::Bootstrapper;
//! use modelstrap::domain::{Layout, MarkerBlock};
//!
//! let boot = Bootstrapper::new(
//!     Layout::new("."),
//!     MarkerBlock::default(),
//!     DockerCli::default(),
//!     LocalFs,
//! );
//! boot.run().expect("bootstrap");
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
