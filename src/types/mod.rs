//! Type definitions for the PAPI client
//!
//! This module contains the request and response structures exchanged with
//! the session layer, plus the cluster resource models.

pub mod models;
pub mod request;
pub mod response;

pub use models::{AccessZone, OnefsId, S3Key, User};
pub use request::{ApiPath, ApiRequest, Body, Headers, Query, SessionRequest};
pub use response::{ApiErrorEntry, ErrorEnvelope, JsonObject, RawResponse};
