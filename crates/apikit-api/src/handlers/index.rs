//! API root.

use crate::controller::ApiController;

/// GET|HEAD /api
pub async fn index(mut api: ApiController) -> ApiController {
    api.allow_methods("GET,HEAD");
    let outcome = api.rel("@api");
    api.finish(outcome)
}
