//! Data models for the datakit API.
//!
//! - `Collection`: the fixed collection endpoints and their paths
//! - `CollectionQuery`, `QueryValue`: caller-supplied query parameters
//! - `CountryList`, `Country`: typed view of the `countries` listing

pub mod collection;
pub mod country;
pub mod query;

pub use collection::Collection;
pub use country::{Country, CountryList};
pub use query::{CollectionQuery, QueryValue};
