//! REST API client module for the datakit enrichment service.
//!
//! This module provides the `SessionClient` for authorizing against the
//! token endpoint and fetching collections from the data API.
//!
//! The data API uses bearer token authentication plus an `Instance-ID`
//! header, both obtained through the API-key exchange in `authorize`.

pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{Authorization, SessionClient};
pub use error::{ApiError, TransportError};
pub use request::{HttpMethod, RequestBody, RequestDescriptor};
pub use transport::{ReqwestTransport, ResponseBody, Transport, TransportResponse};
