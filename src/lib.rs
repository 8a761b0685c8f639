//! papi-lite - PowerScale OneFS Platform API client
//!
//! A lightweight client for the OneFS Platform API (PAPI). The library takes
//! care of the cookie based session (login, logout and re-authentication when
//! the session expires) and transparently combines paged responses that carry
//! a `resume` token into a single result.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//! - **Session layer** ([`session`]): [`PapiSession`] holds the endpoint,
//!   credentials and tokens, dispatches raw requests and aggregates pages.
//! - **Wrapper layer** ([`wrapper`]): [`ClusterConnection`] offers typed calls
//!   (access zones, users, groups, S3 keys) on top of the session layer.
//!
//! Calls that have no typed wrapper can always be made through
//! [`PapiSession::send`] directly.
//!
//! # Examples
//!
//! ```rust,no_run
//! use papi_lite::{ApiRequest, PapiSession};
//!
//! # async fn example() -> papi_lite::Result<()> {
//! let mut session = PapiSession::new("https://cluster.example.com:8080");
//! session.set_user("api_user");
//! session.set_password("user_password");
//! session.set_ignore_cert(true);
//! session.connect().await?;
//!
//! let latest = session.send(&ApiRequest::get("platform/latest")).await?;
//! println!("{:?}", latest);
//!
//! session.disconnect().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;
pub mod wrapper;

pub use config::Settings;
pub use error::{Error, Result};
pub use session::{PapiSession, PapiTransport, TransportConfig};
pub use types::{ApiPath, ApiRequest, Body, JsonObject, RawResponse};
pub use wrapper::ClusterConnection;
