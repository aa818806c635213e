//! datakit-core - client library for the datakit enrichment API.
//!
//! The API exposes read-only collections (attractions, categories, countries,
//! concepts, entities, keywords) behind an API-key-for-bearer-token exchange.
//! [`SessionClient`] owns the session obtained from that exchange and issues
//! every collection request through an injectable [`Transport`].

pub mod api;
pub mod auth;
pub mod models;

pub use api::{
    ApiError, Authorization, ReqwestTransport, RequestDescriptor, ResponseBody, SessionClient,
    Transport, TransportError, TransportResponse,
};
pub use auth::{Session, SessionData};
pub use models::{Collection, CollectionQuery, Country, CountryList, QueryValue};
