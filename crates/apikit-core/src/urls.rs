//! Absolute and relative URL composition.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::result::AppResult;

/// Builds URLs for this service and for third parties.
///
/// Internal paths may be given literally (`/api/user`) or as a route alias
/// (`@user`) resolved against the configured alias table.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    scheme: String,
    host: String,
    aliases: BTreeMap<String, String>,
}

impl UrlBuilder {
    /// Create a builder for `scheme://host`.
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        aliases: BTreeMap<String, String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            aliases,
        }
    }

    /// Create a builder from the server's public URL settings.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.public_scheme.clone(),
            config.public_host.clone(),
            config.aliases.clone(),
        )
    }

    /// The `scheme://host` prefix of absolute URLs.
    pub fn base(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Resolve an alias or path to an absolute path starting with `/`.
    pub fn resolve(&self, path: &str) -> AppResult<String> {
        let path = match path.strip_prefix('@') {
            Some(alias) => self
                .aliases
                .get(alias)
                .cloned()
                .ok_or_else(|| AppError::configuration(format!("Unknown route alias '@{alias}'")))?,
            None => path.to_string(),
        };

        if path.starts_with('/') {
            Ok(path)
        } else {
            Ok(format!("/{path}"))
        }
    }

    /// Build a URL to this service.
    ///
    /// With `full` the URL is absolute, otherwise only the path and query.
    pub fn internal<I, K, V>(&self, path: &str, params: I, full: bool) -> AppResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.resolve(path)?;
        append_query(&mut url, params);

        if full {
            Ok(format!("{}{}", self.base(), url))
        } else {
            Ok(url)
        }
    }

    /// Absolute link for a response field.
    ///
    /// `http(s)://` targets go through [`UrlBuilder::external`], upgraded to
    /// https when this service is public over https; anything else is an
    /// internal path or alias.
    pub fn link(&self, target: &str) -> AppResult<String> {
        if target.starts_with("http://") || target.starts_with("https://") {
            let https = self.scheme.eq_ignore_ascii_case("https");
            return Ok(Self::external(target, NO_PARAMS, https));
        }
        self.internal(target, NO_PARAMS, true)
    }

    /// Build a URL to another site, upgrading `http://` to `https://` when `https` is set.
    pub fn external<I, K, V>(url: &str, params: I, https: bool) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = url.to_string();
        append_query(&mut url, params);

        if https {
            if let Some(rest) = url.strip_prefix("http://") {
                url = format!("https://{rest}");
            }
        }
        url
    }
}

const NO_PARAMS: [(&str, &str); 0] = [];

/// Encode key/value pairs as an `application/x-www-form-urlencoded` query string.
pub fn query_string<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

fn append_query<I, K, V>(url: &mut String, params: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = query_string(params);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
}
