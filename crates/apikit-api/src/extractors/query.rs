//! Query parameters understood by every API route.

use apikit_core::types::RequestPagingParams;

/// Raw query parameters, kept as strings so malformed values degrade to
/// "absent" instead of rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct ApiQuery {
    /// Page number.
    pub page: Option<String>,
    /// Page size.
    pub per_page: Option<String>,
    /// `0` for insertion order, anything else reverses.
    pub sort_direction: Option<String>,
    /// Bearer access token.
    pub access_token: Option<String>,
    /// Requested API version.
    pub version: Option<String>,
}

impl ApiQuery {
    /// Collect from decoded `key=value` pairs. The first occurrence of a key
    /// wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "per_page" => &mut query.per_page,
                "sort_direction" => &mut query.sort_direction,
                "access_token" => &mut query.access_token,
                "version" => &mut query.version,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// Normalized paging options.
    pub fn paging(&self) -> RequestPagingParams {
        RequestPagingParams::from_raw(
            self.page.as_deref(),
            self.per_page.as_deref(),
            self.sort_direction.as_deref(),
        )
    }

    /// Requested version, when numeric and non-zero.
    pub fn version(&self) -> Option<u32> {
        self.version
            .as_deref()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|v| *v > 0)
    }

    /// Non-empty access token.
    pub fn access_token(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}
