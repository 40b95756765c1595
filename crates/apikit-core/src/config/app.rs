//! Server, public URL, and CORS configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Scheme used when building absolute URLs (`http` or `https`).
    #[serde(default = "default_public_scheme")]
    pub public_scheme: String,
    /// Host (and optional port) used when building absolute URLs.
    #[serde(default = "default_public_host")]
    pub public_host: String,
    /// Named routes usable as `@name` in internal URLs.
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
    /// CORS and caching headers emitted with every API response.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_scheme: default_public_scheme(),
            public_host: default_public_host(),
            aliases: default_aliases(),
            cors: CorsConfig::default(),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) response header configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin`.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
    /// Value of `Access-Control-Allow-Credentials`.
    #[serde(default)]
    pub allow_credentials: bool,
    /// Seconds a response may be cached; `0` disables caching.
    #[serde(default)]
    pub ttl_seconds: u64,
    /// Value of `Access-Control-Expose-Headers`, omitted when unset.
    #[serde(default)]
    pub expose_headers: Option<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
            allow_credentials: false,
            ttl_seconds: 0,
            expose_headers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_scheme() -> String {
    "http".to_string()
}

fn default_public_host() -> String {
    "localhost:8080".to_string()
}

fn default_aliases() -> BTreeMap<String, String> {
    [
        ("api", "/api"),
        ("user", "/api/user"),
        ("oauth_errors", "/api/oauth/errors"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect()
}

fn default_allowed_origin() -> String {
    "*".to_string()
}
