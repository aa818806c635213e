//! Query parameters forwarded verbatim to the collection endpoints.
//!
//! The remote API is the authority on which parameters a collection accepts,
//! so nothing here validates keys or values. Serialization rules:
//!
//! - pairs are emitted in insertion order as `key=value`, joined by `&`
//! - keys and values are percent-encoded: the RFC 3986 unreserved set
//!   (`A-Z a-z 0-9 - _ . ~`) is kept, everything else is `%XX`-encoded
//! - a key appended more than once produces repeated pairs
//! - non-finite floats serialize as an empty value

use std::fmt;

/// A single primitive query value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Integer(n) => write!(f, "{}", n),
            QueryValue::Float(x) if x.is_finite() => write!(f, "{}", x),
            QueryValue::Float(_) => Ok(()),
            QueryValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// Ordered key/value parameters for a collection request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionQuery {
    pairs: Vec<(String, QueryValue)>,
}

impl CollectionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.append(key, value);
        self
    }

    /// Append a pair. Existing pairs with the same key are kept.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Serialize to `a=1&b=2` form, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(&value.to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for CollectionQuery
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = CollectionQuery::new();
        for (key, value) in iter {
            query.append(key, value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_in_insertion_order() {
        let query = CollectionQuery::new()
            .with("location", "37.7749,-122.4194")
            .with("category", "landmarks");

        assert_eq!(
            query.to_query_string(),
            "location=37.7749%2C-122.4194&category=landmarks"
        );
    }

    #[test]
    fn test_encodes_outside_unreserved_set() {
        let query = CollectionQuery::new().with("q", "café & bar/é~_.-");
        assert_eq!(
            query.to_query_string(),
            "q=caf%C3%A9%20%26%20bar%2F%C3%A9~_.-"
        );
    }

    #[test]
    fn test_encodes_sub_delims() {
        let query = CollectionQuery::new().with("name", "it's (fun)!*");
        assert_eq!(query.to_query_string(), "name=it%27s%20%28fun%29%21%2A");
    }

    #[test]
    fn test_primitive_values() {
        let query = CollectionQuery::new()
            .with("limit", 25)
            .with("radius", 1.5)
            .with("whole", 2.0)
            .with("verbose", true)
            .with("bad", f64::NAN);

        assert_eq!(
            query.to_query_string(),
            "limit=25&radius=1.5&whole=2&verbose=true&bad="
        );
    }

    #[test]
    fn test_repeated_keys() {
        let query: CollectionQuery = [("tag", "museum"), ("tag", "park")].into_iter().collect();
        assert_eq!(query.len(), 2);
        assert_eq!(query.get("tag"), Some(&QueryValue::from("museum")));
        assert_eq!(query.to_query_string(), "tag=museum&tag=park");
    }

    #[test]
    fn test_empty_query() {
        let query = CollectionQuery::new();
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }
}
