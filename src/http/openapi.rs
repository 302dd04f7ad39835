//! Machine-readable schema document.

use utoipa::OpenApi;

use crate::routes::handlers::{self, HealthResponse, JobsResponse};
use crate::scheduler::JobInfo;
use crate::settings::Settings;

/// Semantic version advertised in the schema document.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::list_jobs),
    components(schemas(HealthResponse, JobsResponse, JobInfo)),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "jobs", description = "Background job scheduler state")
    )
)]
pub struct ApiDoc;

/// Schema document for the given settings.
///
/// Documented paths are relative to the router; they are rewritten here to
/// include the API prefix they are mounted under.
pub fn build_document(settings: &Settings) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = settings.project_name.clone();
    doc.info.version = API_VERSION.to_string();

    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| (format!("{}{}", settings.api_v1_str, path), item))
        .collect();
    doc
}
