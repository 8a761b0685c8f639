//! Typed calls over the session layer
//!
//! [`ClusterConnection`] wraps any [`crate::session::PapiTransport`] and decodes
//! merged responses into the models in [`crate::types::models`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use papi_lite::{ClusterConnection, config::ClusterSettings};
//!
//! # async fn example() -> papi_lite::Result<()> {
//! let settings = ClusterSettings {
//!     endpoint: "https://cluster.example.com:8080".to_string(),
//!     user: "api_user".to_string(),
//!     password: "secret".to_string(),
//!     ignore_cert: true,
//!     ..ClusterSettings::default()
//! };
//!
//! let mut conn = ClusterConnection::new();
//! conn.connect(&settings).await?;
//! for zone in conn.get_access_zone_list().await? {
//!     for user in conn.get_user_list(&zone.name).await? {
//!         println!("{}: {}", zone.name, user.name);
//!     }
//! }
//! conn.disconnect().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod conn;
pub mod s3;
pub mod zones;

#[cfg(test)]
pub(crate) mod testing;

pub use conn::{ClusterConnection, DEFAULT_PLATFORM_PATH, DEFAULT_ZONE};
