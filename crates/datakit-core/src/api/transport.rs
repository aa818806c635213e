//! The HTTP transport seam.
//!
//! `SessionClient` never talks to the network directly; it hands a
//! [`RequestDescriptor`] to a [`Transport`] and normalizes what comes back.
//! [`ReqwestTransport`] is the default implementation.

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde_json::Value;
use tracing::debug;

use super::request::{HttpMethod, RequestBody, RequestDescriptor};
use super::TransportError;

/// Body of a response, either already parsed or as raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl TransportResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: ResponseBody::Json(body),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Text(body.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and reports either a response or a transport-level
/// failure (network, DNS, TLS, timeout, malformed URL).
///
/// Uses `async_trait` so clients can hold an `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<TransportResponse, TransportError>;
}

/// Transport backed by reqwest.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ReqwestTransport {
    strict: Client,
    lenient: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let strict = Client::builder()
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to build HTTP client: {}", e)))?;
        let lenient = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { strict, lenient })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<TransportResponse, TransportError> {
        let client = if request.strict_ssl {
            &self.strict
        } else {
            &self.lenient
        };
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = client.request(method, &request.url).timeout(request.timeout);
        if request.expect_json {
            builder = builder.header(header::ACCEPT, "application/json");
        }
        if let Some(headers) = request.headers {
            builder = builder.headers(headers);
        }
        if let RequestBody::Form(ref pairs) = request.body {
            builder = builder.form(pairs);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, &e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, &e))?;
        debug!(status, bytes = text.len(), "Response received");

        let body = if request.expect_json {
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(text),
            }
        } else {
            ResponseBody::Text(text)
        };

        Ok(TransportResponse { status, body })
    }
}
