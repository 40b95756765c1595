//! Serializes an [`Envelope`] with its cache, CORS and ETag headers.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use md5::{Digest, Md5};
use tracing::warn;

use apikit_core::config::CorsConfig;
use apikit_core::result::AppResult;

use crate::envelope::Envelope;

/// Response header options for one API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOptions {
    /// Seconds the response may be cached; `0` forbids caching.
    pub ttl: u64,
    /// `Access-Control-Allow-Methods`, e.g. `GET,HEAD`.
    pub http_methods: Option<String>,
    /// `Access-Control-Expose-Headers`.
    pub expose_headers: Option<String>,
    /// `Access-Control-Allow-Origin`.
    pub origin: String,
    /// `Access-Control-Allow-Credentials`.
    pub credentials: bool,
    /// Explicit `ETag` instead of the body digest.
    pub etag: Option<String>,
    /// Explicit `Expires` instead of now + ttl.
    pub expires: Option<SystemTime>,
    /// Status to send instead of 200.
    pub http_status: Option<StatusCode>,
    /// Keep `Set-Cookie` headers.
    pub cookie: bool,
    /// Extra headers, overridden by the computed ones.
    pub headers: BTreeMap<String, String>,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            ttl: 0,
            http_methods: None,
            expose_headers: None,
            origin: "*".to_string(),
            credentials: false,
            etag: None,
            expires: None,
            http_status: None,
            cookie: false,
            headers: BTreeMap::new(),
        }
    }
}

impl ResponseOptions {
    /// Defaults taken from the server's CORS settings.
    pub fn from_cors(cors: &CorsConfig) -> Self {
        Self {
            ttl: cors.ttl_seconds,
            expose_headers: cors.expose_headers.clone(),
            origin: cors.allowed_origin.clone(),
            credentials: cors.allow_credentials,
            ..Self::default()
        }
    }
}

/// A fully rendered JSON response.
///
/// Header names keep their exact spelling here; they are only normalized
/// when converted into an HTTP response.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    /// Response status.
    pub status: StatusCode,
    /// Headers, sorted by name.
    pub headers: BTreeMap<String, String>,
    /// Body; empty for `HEAD`.
    pub body: Bytes,
}

impl JsonResponse {
    /// Render `envelope` for a request with the given verb at time `now`.
    pub fn build_at(
        method: &Method,
        envelope: &Envelope,
        options: &ResponseOptions,
        now: SystemTime,
    ) -> AppResult<Self> {
        let body = envelope.to_body()?;

        let mut headers = options.headers.clone();
        if !options.cookie {
            headers.retain(|name, _| !name.eq_ignore_ascii_case("set-cookie"));
        }

        let expires = options
            .expires
            .unwrap_or_else(|| now + Duration::from_secs(options.ttl));
        let etag = options
            .etag
            .clone()
            .unwrap_or_else(|| format!("{:x}", Md5::digest(&body)));

        set(&mut headers, "Content-type", "application/json; charset=utf-8");
        set(&mut headers, "Expires", &httpdate::fmt_http_date(expires));
        set(&mut headers, "Access-Control-Max-Age", &options.ttl.to_string());
        if let Some(expose) = options.expose_headers.as_deref().filter(|v| !v.is_empty()) {
            set(&mut headers, "Access-Control-Expose-Headers", expose);
        }
        if let Some(methods) = options.http_methods.as_deref().filter(|v| !v.is_empty()) {
            set(&mut headers, "Access-Control-Allow-Methods", methods);
        }
        set(&mut headers, "Access-Control-Allow-Origin", &options.origin);
        set(
            &mut headers,
            "Access-Control-Allow-Credentials",
            if options.credentials { "true" } else { "false" },
        );
        set(&mut headers, "ETag", &etag);
        set(&mut headers, "Content-Length", &body.len().to_string());
        if options.ttl == 0 {
            set(&mut headers, "Cache-Control", "no-cache, no-store, must-revalidate");
            set(&mut headers, "Pragma", "no-cache");
        }

        let body = if *method == Method::HEAD {
            Bytes::new()
        } else {
            Bytes::from(body)
        };

        Ok(Self {
            status: options.http_status.unwrap_or(StatusCode::OK),
            headers,
            body,
        })
    }

    /// Header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Insert `name`, replacing any header with the same name in another case.
fn set(headers: &mut BTreeMap<String, String>, name: &str, value: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let target = response.headers_mut();
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    target.insert(name, value);
                }
                _ => warn!(header = %name, "Dropping invalid response header"),
            }
        }
        response
    }
}
