//! Session client for the datakit enrichment API.
//!
//! This module provides the `SessionClient` struct, which exchanges an API
//! key for a bearer token and then fetches collections with it.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::auth::{Session, SessionData};
use crate::models::{Collection, CollectionQuery, CountryList};

use super::request::RequestDescriptor;
use super::response::{normalize, parse_body};
use super::transport::{ReqwestTransport, Transport};
use super::ApiError;

/// Result of a successful token exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Authorization {
    pub status: u16,
    pub body: Value,
}

/// Client for the datakit API.
///
/// Clones share the same session and transport, so authorizing through one
/// clone authorizes all of them.
#[derive(Clone)]
pub struct SessionClient {
    transport: Arc<dyn Transport>,
    session: Arc<RwLock<Session>>,
}

impl SessionClient {
    /// Create a new client backed by reqwest
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?)))
    }

    /// Create a client that dispatches through `transport`.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            session: Arc::new(RwLock::new(Session::new())),
        }
    }

    fn read_session(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exchange `api_key` for a bearer token and start a session.
    ///
    /// Any response carrying a non-empty `access_token` starts the session,
    /// which then holds the token, `instance_id`, and `api_url` minus one
    /// trailing slash. On any failure the session is untouched.
    pub async fn authorize(
        &self,
        token_url: &str,
        api_url: &str,
        api_key: &str,
        instance_id: &str,
    ) -> Result<Authorization, ApiError> {
        debug!(token_url, instance_id, "Requesting access token");

        let request = RequestDescriptor::auth_exchange(token_url, api_key, instance_id);
        let response = self.transport.send(request).await?;
        let status = response.status;
        let success = response.is_success();

        let body = match parse_body(response.body) {
            Ok(body) => body,
            Err(ApiError::BodyParse { body, .. }) if !success => {
                return Err(ApiError::from_status(status, &body));
            }
            Err(e) => return Err(e),
        };

        let token = match body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
        {
            Some(token) => token.to_string(),
            None => {
                if let Some(err) = Self::auth_service_error(&body) {
                    warn!(status, error = %err, "Token endpoint rejected the API key");
                    return Err(err);
                }
                if !success {
                    return Err(ApiError::from_status(status, &body.to_string()));
                }
                return Err(ApiError::InvalidResponse(
                    "Token response has no access_token".to_string(),
                ));
            }
        };
        let defaults = match &body {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };

        let data = SessionData::new(token, instance_id.to_string(), api_url, defaults);
        debug!(
            instance_id,
            api_base_url = %data.api_base_url,
            expires_at = ?data.expires_at(),
            "Session authorized"
        );
        self.write_session().update(data);

        Ok(Authorization { status, body })
    }

    fn auth_service_error(body: &Value) -> Option<ApiError> {
        let error = match body.get("error")? {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let description = body
            .get("error_description")
            .or_else(|| body.get("errorMessage"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(ApiError::AuthService { error, description })
    }

    pub fn is_authorized(&self) -> bool {
        self.read_session().is_authorized()
    }

    pub fn auth_token(&self) -> Option<String> {
        self.read_session().token().map(str::to_string)
    }

    pub fn instance_id(&self) -> Option<String> {
        self.read_session().instance_id().map(str::to_string)
    }

    pub fn api_base_url(&self) -> Option<String> {
        self.read_session().api_base_url().map(str::to_string)
    }

    /// Snapshot of the current session, including the token response
    /// defaults and expiration.
    pub fn session(&self) -> Option<SessionData> {
        self.read_session().data.clone()
    }

    // ===== Collection Fetching Methods =====

    /// Fetch one collection.
    ///
    /// The query is forwarded verbatim. There is no local authorization
    /// check: an unauthorized request goes out without credentials and
    /// fails at the transport.
    pub async fn fetch(
        &self,
        collection: Collection,
        query: Option<&CollectionQuery>,
    ) -> Result<Value, ApiError> {
        let request = {
            let session = self.read_session();
            RequestDescriptor::data_call(&session, collection.path(), query)?
        };
        debug!(%collection, url = %request.url, "Fetching collection");

        normalize(self.transport.send(request).await)
    }

    pub async fn get_categories(&self) -> Result<Value, ApiError> {
        self.fetch(Collection::Categories, None).await
    }

    pub async fn get_countries(&self) -> Result<Value, ApiError> {
        self.fetch(Collection::Countries, None).await
    }

    pub async fn get_attractions(&self, query: &CollectionQuery) -> Result<Value, ApiError> {
        self.fetch(Collection::Attractions, Some(query)).await
    }

    pub async fn get_concepts(&self, query: &CollectionQuery) -> Result<Value, ApiError> {
        self.fetch(Collection::Concepts, Some(query)).await
    }

    pub async fn get_entities(&self, query: &CollectionQuery) -> Result<Value, ApiError> {
        self.fetch(Collection::Entities, Some(query)).await
    }

    pub async fn get_keywords(&self, query: &CollectionQuery) -> Result<Value, ApiError> {
        self.fetch(Collection::Keywords, Some(query)).await
    }

    /// Fetch the countries listing as typed entries.
    pub async fn get_country_list(&self) -> Result<CountryList, ApiError> {
        let value = self.get_countries().await?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::InvalidResponse(format!("Unexpected countries response: {}", e)))
    }
}
