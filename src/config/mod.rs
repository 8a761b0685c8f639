//! Configuration management for the PAPI client
//!
//! This module handles loading cluster settings from files and environment
//! variables. The session layer itself only sees a [`crate::session::TransportConfig`].

pub mod loader;
pub mod settings;

pub use loader::{ConfigLoader, default_config_path};
pub use settings::{ClusterSettings, LoggingSettings, Settings};
