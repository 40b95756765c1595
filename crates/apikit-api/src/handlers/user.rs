//! Access-token lookup for the calling account.

use apikit_core::result::AppResult;

use crate::controller::ApiController;

/// GET|HEAD /api/user
///
/// Accepts `?access_token=`, Basic `email:password` or Basic `email:token`
/// and echoes the resolved token.
pub async fn user(mut api: ApiController) -> ApiController {
    api.allow_methods("GET,HEAD");
    let outcome = attach_token(&mut api).await;
    api.finish(outcome)
}

async fn attach_token(api: &mut ApiController) -> AppResult<()> {
    if let Some(token) = api.validate_access().await? {
        api.insert("access_token", token)?;
    }
    Ok(())
}
