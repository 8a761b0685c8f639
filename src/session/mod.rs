//! Session management for PAPI calls
//!
//! This module handles the session lifecycle (login, logout, re-authentication),
//! request dispatch with the cluster's session headers, and the aggregation of
//! paged responses into a single result.

pub mod client;
pub mod config;
pub mod cookies;
pub mod headers;
pub mod manager;
pub mod paginate;
pub mod transport;

pub use client::build_http_client;
pub use config::TransportConfig;
pub use manager::{PapiSession, SESSION_PATH};
pub use paginate::MAX_PAGE_COUNT;
pub use transport::PapiTransport;
