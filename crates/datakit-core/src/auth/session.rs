use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// Everything recorded by one successful authorization.
///
/// Token, instance id and base URL are stored together so that a session
/// either has all three or none of them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionData {
    pub token: String,
    pub instance_id: String,
    pub api_base_url: String,
    /// Raw `expiration` field from the token response, if any.
    pub expiration: Option<Value>,
    /// The full token response.
    pub defaults: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(
        token: String,
        instance_id: String,
        api_url: &str,
        defaults: Map<String, Value>,
    ) -> Self {
        let expiration = defaults.get("expiration").cloned();
        Self {
            token,
            instance_id,
            api_base_url: strip_trailing_slash(api_url).to_string(),
            expiration,
            defaults,
            created_at: Utc::now(),
        }
    }

    /// Expiration interpreted as Unix seconds.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let secs = match self.expiration.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
            Value::String(s) => s.trim().parse::<i64>().ok()?,
            _ => return None,
        };
        Utc.timestamp_opt(secs, 0).single()
    }

    /// False when the token response carried no usable expiration.
    pub fn is_expired(&self) -> bool {
        self.expires_at().map(|at| Utc::now() >= at).unwrap_or(false)
    }
}

/// Removes at most one trailing `/`.
pub(crate) fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with a fresh authorization.
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Get the bearer token if authorized
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.instance_id.as_str())
    }

    pub fn api_base_url(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.api_base_url.as_str())
    }

    pub fn is_authorized(&self) -> bool {
        self.data.is_some()
    }
}
