//! OpenAPI documentation for the dashboard endpoints.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use super::AppContext;
use crate::tdarr::{LibraryPie, PieSegment, QueueEntry, QueueEntryKind, QueuePage, Statistics, Worker};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "tdarr-bridge API",
        version = "0.1.0",
        description = "Dashboard view of a Tdarr instance",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    paths(
        super::routes::statistics,
        super::routes::workers,
        super::routes::queue,
    ),
    components(
        schemas(
            Statistics,
            LibraryPie,
            PieSegment,
            Worker,
            QueueEntry,
            QueueEntryKind,
            QueuePage,
        )
    ),
    tags(
        (name = "tdarr", description = "Tdarr statistics, workers and queue")
    )
)]
pub struct ApiDoc;

pub fn openapi_routes() -> Router<AppContext> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
