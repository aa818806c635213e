//! Session state for an authorized client.
//!
//! This module provides:
//! - `Session`: holder for the credentials obtained from the token endpoint
//! - `SessionData`: the token, instance id and base URL of one authorization
//!
//! Sessions live in memory for the lifetime of the client; nothing is
//! persisted and there is no refresh after the initial exchange.

pub mod session;

pub use session::{Session, SessionData};
