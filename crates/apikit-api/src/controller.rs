//! Per-request accumulator for API responses.
//!
//! Handlers receive an [`ApiController`], fill in data and errors, and
//! return it; it renders itself into the JSON envelope on the way out.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use apikit_auth::BasicCredentials;
use apikit_core::result::AppResult;
use apikit_core::types::RequestPagingParams;

use crate::envelope::Envelope;
use crate::oauth::{self, OAuthError, OAuthErrorCode};
use crate::paging::paginate;
use crate::response::{JsonResponse, ResponseOptions};
use crate::state::AppState;

/// Business error code for a request without a usable access token.
pub const MISSING_ACCESS_TOKEN: i64 = 4007;
/// Business error code for a route that does not exist.
pub const UNKNOWN_API_REQUEST: i64 = 4998;

/// Request-scoped response builder.
#[derive(Debug)]
pub struct ApiController {
    state: AppState,
    version: u32,
    method: Method,
    path: String,
    paging: RequestPagingParams,
    query_token: Option<String>,
    basic: Option<BasicCredentials>,
    data: Map<String, Value>,
    errors: BTreeMap<i64, String>,
    oauth_error: Option<OAuthError>,
    options: ResponseOptions,
}

/// Request inputs the controller is built from.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    /// `version` query parameter, when numeric and non-zero.
    pub version: Option<u32>,
    /// HTTP verb.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Paging options.
    pub paging: RequestPagingParams,
    /// `access_token` query parameter.
    pub access_token: Option<String>,
    /// HTTP Basic credentials.
    pub basic: Option<BasicCredentials>,
}

impl ApiController {
    /// Create a controller for one request.
    pub fn new(state: AppState, input: RequestInput) -> Self {
        let version = input.version.unwrap_or(state.config.api.version);
        let options = ResponseOptions::from_cors(&state.config.server.cors);
        Self {
            state,
            version,
            method: input.method,
            path: input.path,
            paging: input.paging,
            query_token: input.access_token,
            basic: input.basic,
            data: Map::new(),
            errors: BTreeMap::new(),
            oauth_error: None,
            options,
        }
    }

    /// API version reported in the envelope.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Paging options of the request.
    pub fn paging(&self) -> &RequestPagingParams {
        &self.paging
    }

    /// Record a business error, optionally setting the response status.
    ///
    /// A later error with the same code replaces the message.
    pub fn failure(&mut self, code: i64, message: impl Into<String>, http_status: Option<StatusCode>) {
        self.errors.insert(code, message.into());
        if let Some(status) = http_status {
            self.options.http_status = Some(status);
        }
    }

    /// Business errors recorded so far.
    pub fn errors(&self) -> &BTreeMap<i64, String> {
        &self.errors
    }

    /// Set the OAuth error by wire code.
    ///
    /// Fails with a configuration error (code 5100) for unknown codes.
    pub fn set_oauth_error(&mut self, code: &str, state: Option<&str>) -> AppResult<OAuthError> {
        let error = oauth::lookup(code, state)?;
        Ok(self.apply_oauth_error(error))
    }

    /// Set the OAuth error from a known code.
    pub fn oauth_error(&mut self, code: OAuthErrorCode, state: Option<&str>) -> OAuthError {
        self.apply_oauth_error(OAuthError::new(code, state))
    }

    fn apply_oauth_error(&mut self, error: OAuthError) -> OAuthError {
        self.options.http_status = Some(error.http_status());
        self.oauth_error = Some(error.clone());
        error
    }

    /// Resolve the caller's access token.
    ///
    /// On failure sets the `invalid_request` OAuth error and business error
    /// 4007 and returns `Ok(None)`; only account-store failures are `Err`.
    pub async fn validate_access(&mut self) -> AppResult<Option<String>> {
        let resolution = self
            .state
            .token_resolver()
            .resolve(self.query_token.as_deref(), self.basic.as_ref())
            .await?;

        if let Some(token) = resolution.access_token {
            debug!(source = ?resolution.source, "Access token resolved");
            return Ok(Some(token));
        }

        self.oauth_error(OAuthErrorCode::InvalidRequest, None);
        self.failure(
            MISSING_ACCESS_TOKEN,
            "Missing bearer access token",
            Some(StatusCode::BAD_REQUEST),
        );
        Ok(None)
    }

    /// Set `rel` to the absolute URL of `path` (a path, `@alias` or external URL).
    pub fn rel(&mut self, path: &str) -> AppResult<()> {
        let url = self.state.urls.link(path)?;
        self.data.insert("rel".to_string(), Value::String(url));
        Ok(())
    }

    /// Set `href` to the absolute URL of `path`, or of the current request.
    pub fn href(&mut self, path: Option<&str>) -> AppResult<()> {
        let path = path.filter(|p| !p.is_empty()).unwrap_or(&self.path);
        let url = self.state.urls.link(path)?;
        self.data.insert("href".to_string(), Value::String(url));
        Ok(())
    }

    /// Record the outcome of a handler.
    ///
    /// A fatal error replaces everything gathered so far with a single
    /// business error keyed by the error's code, at the status of its kind.
    pub fn finish(mut self, outcome: AppResult<()>) -> Self {
        if let Err(err) = outcome {
            if err.is_server_error() {
                error!(kind = %err.kind, code = err.code(), path = %self.path, error = %err, "Request aborted");
            }
            self.data.clear();
            self.errors.clear();
            self.oauth_error = None;
            self.failure(err.code(), err.message, Some(err.kind.status()));
        }
        self
    }

    /// Add a top-level field to the response data.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) -> AppResult<()> {
        self.data.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Allowed methods advertised in `Access-Control-Allow-Methods`.
    pub fn allow_methods(&mut self, methods: impl Into<String>) {
        self.options.http_methods = Some(methods.into());
    }

    /// Page `items` per the request and attach the `paging` block.
    pub fn page_results<T>(&mut self, items: Vec<T>) -> AppResult<Vec<T>> {
        if !self.paging.is_paged() {
            return Ok(items);
        }

        let base_url = self.state.urls.internal(&self.path, NO_PARAMS, true)?;
        let (page, info) = paginate(items, &self.paging, &base_url);
        if let Some(info) = info {
            self.insert("paging", info)?;
        }
        Ok(page)
    }

    /// Render the response as of `now`.
    pub fn respond_at(mut self, now: SystemTime) -> AppResult<JsonResponse> {
        let has_href = self
            .data
            .get("href")
            .is_some_and(|v| !v.is_null() && v.as_str() != Some(""));
        if !has_href {
            self.href(None)?;
        }

        let time = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let envelope = Envelope::new(self.version, self.method.as_str(), time)
            .with_data(Value::Object(self.data))
            .with_oauth_error(self.oauth_error)
            .with_errors(self.errors);

        JsonResponse::build_at(&self.method, &envelope, &self.options, now)
    }
}

const NO_PARAMS: [(&str, &str); 0] = [];

impl IntoResponse for ApiController {
    fn into_response(self) -> Response {
        match self.respond_at(SystemTime::now()) {
            Ok(response) => response.into_response(),
            Err(err) => err.into_response(),
        }
    }
}
