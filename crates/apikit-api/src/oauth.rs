//! OAuth 2.0 (RFC 6749) protocol error registry.
//!
//! At most one OAuth error is attached to a response. Each code carries a
//! fixed HTTP status. Asking for a code outside the registry is a
//! programming error and surfaces as a fatal configuration error.

use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;
use serde::Serialize;

use apikit_core::error::AppError;
use apikit_core::result::AppResult;

/// Error code returned for an unknown OAuth error type.
pub const INVALID_OAUTH_ERROR_CODE: i64 = 5100;

/// The fixed vocabulary of OAuth error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OAuthErrorCode {
    InvalidRequest,
    InvalidCredentials,
    InvalidClient,
    InvalidGrant,
    UnsupportedGrantType,
    UnauthorizedClient,
    AccessDenied,
    UnsupportedResponseType,
    InvalidScope,
    ServerError,
    TemporarilyUnavailable,
}

impl OAuthErrorCode {
    /// Every code, in registry order.
    pub const ALL: [OAuthErrorCode; 11] = [
        Self::InvalidRequest,
        Self::InvalidCredentials,
        Self::InvalidClient,
        Self::InvalidGrant,
        Self::UnsupportedGrantType,
        Self::UnauthorizedClient,
        Self::AccessDenied,
        Self::UnsupportedResponseType,
        Self::InvalidScope,
        Self::ServerError,
        Self::TemporarilyUnavailable,
    ];

    /// Wire identifier, e.g. `invalid_request`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidClient => "invalid_client",
            Self::InvalidGrant => "invalid_grant",
            Self::UnsupportedGrantType => "unsupported_grant_type",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::AccessDenied => "access_denied",
            Self::UnsupportedResponseType => "unsupported_response_type",
            Self::InvalidScope => "invalid_scope",
            Self::ServerError => "server_error",
            Self::TemporarilyUnavailable => "temporarily_unavailable",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidRequest => {
                "The request is missing a required parameter, includes an invalid parameter value, includes a parameter more than once, or is otherwise malformed."
            }
            Self::InvalidCredentials => "Credentials for authentication were invalid.",
            Self::InvalidClient => {
                "Client authentication failed (e.g., unknown client, no client authentication included, or unsupported authentication method)."
            }
            Self::InvalidGrant => {
                "The provided authorization grant (e.g., authorization code, resource owner credentials) or refresh token is invalid, expired, revoked, does not match the redirection URI used in the authorization request, or was issued to another client."
            }
            Self::UnsupportedGrantType => {
                "The authorization grant type is not supported by the authorization server."
            }
            Self::UnauthorizedClient => {
                "The client is not authorized to request an authorization code using this method."
            }
            Self::AccessDenied => "The resource owner or authorization server denied the request.",
            Self::UnsupportedResponseType => {
                "The authorization server does not support obtaining an authorization code using this method."
            }
            Self::InvalidScope => "The requested scope is invalid, unknown, or malformed.",
            Self::ServerError => {
                "The authorization server encountered an unexpected condition that prevented it from fulfilling the request."
            }
            Self::TemporarilyUnavailable => {
                "The authorization server is currently unable to handle the request due to a temporary overloading or maintenance of the server."
            }
        }
    }

    /// The HTTP status a response carrying this error must use.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidClient => StatusCode::UNAUTHORIZED,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidCredentials => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for OAuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthErrorCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| {
                AppError::configuration("Invalid OAuth error type.")
                    .with_code(INVALID_OAUTH_ERROR_CODE)
            })
    }
}

/// An OAuth error as serialized under the envelope's `error` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthError {
    /// Error identifier.
    pub code: OAuthErrorCode,
    /// Description from the registry.
    pub description: String,
    /// Documentation link, empty when none.
    pub uri: String,
    /// Application state echoed back, present only when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl OAuthError {
    /// Build the registry template for `code`, attaching `state` when non-empty.
    pub fn new(code: OAuthErrorCode, state: Option<&str>) -> Self {
        Self {
            code,
            description: code.description().to_string(),
            uri: String::new(),
            state: state.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// Status mandated by the code.
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

/// Look up a code by its wire identifier.
///
/// Unknown identifiers are a configuration error with code 5100.
pub fn lookup(code: &str, state: Option<&str>) -> AppResult<OAuthError> {
    let code = code.parse::<OAuthErrorCode>()?;
    Ok(OAuthError::new(code, state))
}

/// Every registry entry, without state.
pub fn catalog() -> Vec<OAuthError> {
    OAuthErrorCode::ALL
        .into_iter()
        .map(|code| OAuthError::new(code, None))
        .collect()
}
