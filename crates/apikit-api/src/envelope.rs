//! The canonical JSON document wrapping every API response.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::oauth::OAuthError;

/// Value of the `service` field.
pub const SERVICE_NAME: &str = "API";

/// Keys owned by the envelope; handler data using them is dropped.
pub const RESERVED_KEYS: [&str; 6] = ["service", "api", "method", "time", "error", "errors"];

/// Top-level response body.
///
/// Serializes as `service, api, method, time`, then the handler data merged
/// at the top level, then `error` (OAuth) and `errors` (business) when set.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    /// Always [`SERVICE_NAME`].
    pub service: &'static str,
    /// API version.
    pub api: u32,
    /// HTTP verb of the request.
    pub method: String,
    /// Unix timestamp of the response.
    pub time: i64,
    /// Handler data.
    #[serde(flatten)]
    pub data: Map<String, Value>,
    /// OAuth protocol error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OAuthError>,
    /// Business errors keyed by numeric code, ascending.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<i64, String>,
}

impl Envelope {
    /// Create an envelope with no data or errors.
    pub fn new(api: u32, method: impl Into<String>, time: i64) -> Self {
        Self {
            service: SERVICE_NAME,
            api,
            method: method.into(),
            time,
            data: Map::new(),
            error: None,
            errors: BTreeMap::new(),
        }
    }

    /// Merge handler data into the envelope.
    ///
    /// Objects merge at the top level; `null` adds nothing; any other value
    /// is carried under a `data` key.
    pub fn with_data(mut self, data: Value) -> Self {
        match data {
            Value::Object(map) => {
                for (key, value) in map {
                    if !RESERVED_KEYS.contains(&key.as_str()) {
                        self.data.insert(key, value);
                    }
                }
            }
            Value::Null => {}
            other => {
                self.data.insert("data".to_string(), other);
            }
        }
        self
    }

    /// Attach the OAuth error.
    pub fn with_oauth_error(mut self, error: Option<OAuthError>) -> Self {
        self.error = error;
        self
    }

    /// Attach business errors.
    pub fn with_errors(mut self, errors: BTreeMap<i64, String>) -> Self {
        self.errors = errors;
        self
    }

    /// Pretty-printed JSON body.
    pub fn to_body(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::oauth::{OAuthError, OAuthErrorCode};

    fn body(envelope: &Envelope) -> String {
        String::from_utf8(envelope.to_body().unwrap()).unwrap()
    }

    #[test]
    fn test_key_order() {
        let envelope = Envelope::new(1, "GET", 1_700_000_000)
            .with_data(json!({"href": "http://x/api", "answer": 42}))
            .with_oauth_error(Some(OAuthError::new(OAuthErrorCode::InvalidRequest, None)))
            .with_errors(BTreeMap::from([(4007, "Missing bearer access token".to_string())]));
        let text = body(&envelope);

        let positions: Vec<usize> = ["\"service\"", "\"api\"", "\"method\"", "\"time\"", "\"answer\"", "\"href\"", "\"error\"", "\"errors\""]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }

    #[test]
    fn test_errors_sorted_numerically_and_omitted_when_empty() {
        let errors = BTreeMap::from([
            (5000, "c".to_string()),
            (400, "a".to_string()),
            (4007, "b".to_string()),
        ]);
        let text = body(&Envelope::new(1, "GET", 0).with_errors(errors));
        let a = text.find("\"400\"").unwrap();
        let b = text.find("\"4007\"").unwrap();
        let c = text.find("\"5000\"").unwrap();
        assert!(a < b && b < c);

        let value: Value = serde_json::from_str(&body(&Envelope::new(1, "GET", 0))).unwrap();
        assert!(value.get("errors").is_none());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_reserved_keys_and_scalar_data() {
        let envelope = Envelope::new(2, "HEAD", 5).with_data(json!({"service": "spoof", "api": 9, "ok": true}));
        assert_eq!(envelope.service, "API");
        assert_eq!(envelope.data.get("ok"), Some(&json!(true)));
        assert!(!envelope.data.contains_key("service"));

        let envelope = Envelope::new(2, "GET", 5).with_data(json!([1, 2]));
        assert_eq!(envelope.data.get("data"), Some(&json!([1, 2])));
    }
}
