//! OAuth error catalog.

use apikit_core::result::AppResult;

use crate::controller::ApiController;
use crate::oauth;

/// GET|HEAD /api/oauth/errors
///
/// Lists every OAuth error code; honours `page`, `per_page` and
/// `sort_direction`.
pub async fn list(mut api: ApiController) -> ApiController {
    api.allow_methods("GET,HEAD");
    let outcome = fill(&mut api);
    api.finish(outcome)
}

fn fill(api: &mut ApiController) -> AppResult<()> {
    let errors = api.page_results(oauth::catalog())?;
    api.insert("oauth_errors", errors)
}
