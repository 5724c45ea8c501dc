//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the bootstrapper and the host it prepares.
//! Adapters implement them for the real machine; tests swap in scripted
//! doubles.
//!
//! ```text
//!                 ┌──────────────────────┐
//!                 │     Bootstrapper     │
//!                 │  (domain + ports)    │
//!                 └──────────┬───────────┘
//!                ┌───────────┴───────────┐
//!                ▼                       ▼
//!         ┌─────────────┐         ┌─────────────┐
//!         │  Container  │         │ Filesystem  │
//!         │  Runtime    │         │             │
//!         └─────────────┘         └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ContainerRuntime`] - daemon check, image build, compose startup
//! - [`Filesystem`] - directories, permissions and config files

pub mod outbound;

pub use outbound::filesystem::Filesystem;
pub use outbound::runtime::ContainerRuntime;
