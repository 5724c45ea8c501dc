//! Infrastructure: settings loading and logging setup.

pub mod config;
