//! Request construction for the token endpoint and the data API.
//!
//! Two shapes exist: the API-key exchange (form POST, no auth headers) and
//! the authenticated data call (GET with bearer token and instance id). A
//! descriptor is built fresh for every call and handed to the transport.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::auth::Session;
use crate::models::CollectionQuery;

use super::ApiError;

/// Grant type identifying the API-key exchange.
pub const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Header carrying the instance id on data calls.
pub const INSTANCE_ID_HEADER: &str = "instance-id";

/// Per-request timeout in milliseconds, applied to every call.
pub const REQUEST_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded` pairs, in order.
    Form(Vec<(String, String)>),
}

/// One outbound call, fully described.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: HttpMethod,
    /// `None` when the session is not authorized.
    pub headers: Option<HeaderMap>,
    pub body: RequestBody,
    pub timeout: Duration,
    pub strict_ssl: bool,
    pub expect_json: bool,
}

impl RequestDescriptor {
    /// POST to the token endpoint exchanging `api_key` for a bearer token.
    ///
    /// The instance id is not part of the grant but travels in the same body
    /// so the endpoint can correlate the exchange with an instance.
    pub fn auth_exchange(token_url: &str, api_key: &str, instance_id: &str) -> Self {
        Self {
            url: token_url.to_string(),
            method: HttpMethod::Post,
            headers: None,
            body: RequestBody::Form(vec![
                ("grant_type".to_string(), APIKEY_GRANT_TYPE.to_string()),
                ("apikey".to_string(), api_key.to_string()),
                ("instance_id".to_string(), instance_id.to_string()),
            ]),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            strict_ssl: true,
            expect_json: true,
        }
    }

    /// GET `path` against the session's API base URL.
    ///
    /// An unauthorized session is not rejected here: the descriptor carries
    /// no headers and a bare relative URL, and the failure surfaces from the
    /// transport.
    pub fn data_call(
        session: &Session,
        path: &str,
        query: Option<&CollectionQuery>,
    ) -> Result<Self, ApiError> {
        let mut url = match session.api_base_url() {
            Some(base) => format!("{}/{}", base, path),
            None => path.to_string(),
        };
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&query.to_query_string());
        }

        Ok(Self {
            url,
            method: HttpMethod::Get,
            headers: Self::auth_headers(session)?,
            body: RequestBody::Empty,
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            strict_ssl: true,
            expect_json: true,
        })
    }

    fn auth_headers(session: &Session) -> Result<Option<HeaderMap>, ApiError> {
        let Some(data) = session.data.as_ref() else {
            return Ok(None);
        };

        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", data.token))
            .map_err(|_| ApiError::InvalidHeader("Authorization"))?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);
        headers.insert(
            HeaderName::from_static(INSTANCE_ID_HEADER),
            HeaderValue::from_str(&data.instance_id)
                .map_err(|_| ApiError::InvalidHeader("Instance-ID"))?,
        );
        Ok(Some(headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionData;
    use serde_json::Map;

    fn authorized_session(api_url: &str) -> Session {
        let mut session = Session::new();
        session.update(SessionData::new(
            "tok-123".to_string(),
            "inst-9".to_string(),
            api_url,
            Map::new(),
        ));
        session
    }

    #[test]
    fn test_auth_exchange_shape() {
        let req = RequestDescriptor::auth_exchange("https://iam.example.com/token", "key", "inst");

        assert_eq!(req.url, "https://iam.example.com/token");
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.headers.is_none());
        assert_eq!(
            req.body,
            RequestBody::Form(vec![
                ("grant_type".to_string(), APIKEY_GRANT_TYPE.to_string()),
                ("apikey".to_string(), "key".to_string()),
                ("instance_id".to_string(), "inst".to_string()),
            ])
        );
        assert_eq!(req.timeout, Duration::from_millis(120_000));
        assert!(req.strict_ssl);
        assert!(req.expect_json);
    }

    #[test]
    fn test_data_call_shape() {
        let session = authorized_session("https://api.example.com/");
        let query = CollectionQuery::new()
            .with("location", "37.7749,-122.4194")
            .with("category", "landmarks");

        let req = RequestDescriptor::data_call(&session, "v1/attractions", Some(&query)).unwrap();

        assert_eq!(
            req.url,
            "https://api.example.com/v1/attractions?location=37.7749%2C-122.4194&category=landmarks"
        );
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.body, RequestBody::Empty);
        assert_eq!(req.timeout, Duration::from_millis(REQUEST_TIMEOUT_MS));

        let headers = req.headers.expect("authorized call carries headers");
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer tok-123");
        assert_eq!(headers.get("Instance-ID").unwrap(), "inst-9");
    }

    #[test]
    fn test_data_call_without_query() {
        let session = authorized_session("https://api.example.com");
        let req = RequestDescriptor::data_call(&session, "v1/categories", None).unwrap();
        assert_eq!(req.url, "https://api.example.com/v1/categories");

        let empty = CollectionQuery::new();
        let req = RequestDescriptor::data_call(&session, "v1/keywords", Some(&empty)).unwrap();
        assert_eq!(req.url, "https://api.example.com/v1/keywords");
    }

    #[test]
    fn test_data_call_unauthorized_has_no_headers() {
        let session = Session::new();
        let req = RequestDescriptor::data_call(&session, "v1/countries", None).unwrap();
        assert_eq!(req.url, "v1/countries");
        assert!(req.headers.is_none());
    }

    #[test]
    fn test_invalid_token_header() {
        let mut session = Session::new();
        session.update(SessionData::new(
            "bad\ntoken".to_string(),
            "inst".to_string(),
            "https://api.example.com",
            Map::new(),
        ));
        let err = RequestDescriptor::data_call(&session, "v1/countries", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader("Authorization")));
    }
}
