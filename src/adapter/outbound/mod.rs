//! Outbound adapters (driven side).

pub mod docker;
pub mod local_fs;

pub use docker::DockerCli;
pub use local_fs::LocalFs;
