use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use super::error::AppError;
use super::AppContext;
use crate::integration::{AppRef, QueueQuery};
use crate::tdarr::{QueuePage, Statistics, Worker};

pub fn tdarr_routes() -> Router<AppContext> {
    Router::new()
        .route("/tdarr/statistics", get(statistics))
        .route("/tdarr/workers", get(workers))
        .route("/tdarr/queue", get(queue))
}

/// Library statistics for a Tdarr app.
#[utoipa::path(
    get,
    path = "/api/tdarr/statistics",
    params(AppRef),
    responses(
        (status = 200, description = "Statistics snapshot", body = Statistics),
        (status = 400, description = "App is not a Tdarr integration"),
        (status = 404, description = "App or config set not found"),
        (status = 502, description = "Tdarr request failed or returned an unexpected shape")
    ),
    tag = "tdarr"
)]
pub async fn statistics(
    State(ctx): State<AppContext>,
    Query(app): Query<AppRef>,
) -> Result<Json<Statistics>, AppError> {
    Ok(Json(ctx.integration.statistics(&app).await?))
}

/// Workers currently running on all nodes.
#[utoipa::path(
    get,
    path = "/api/tdarr/workers",
    params(AppRef),
    responses(
        (status = 200, description = "Running workers", body = Vec<Worker>),
        (status = 400, description = "App is not a Tdarr integration"),
        (status = 404, description = "App or config set not found"),
        (status = 502, description = "Tdarr request failed or returned an unexpected shape")
    ),
    tag = "tdarr"
)]
pub async fn workers(
    State(ctx): State<AppContext>,
    Query(app): Query<AppRef>,
) -> Result<Json<Vec<Worker>>, AppError> {
    Ok(Json(ctx.integration.workers(&app).await?))
}

/// One page of the combined transcode / health-check queue.
#[utoipa::path(
    get,
    path = "/api/tdarr/queue",
    params(QueueQuery),
    responses(
        (status = 200, description = "Queue page", body = QueuePage),
        (status = 400, description = "Invalid paging or app is not a Tdarr integration"),
        (status = 404, description = "App or config set not found"),
        (status = 502, description = "Tdarr request failed or returned an unexpected shape")
    ),
    tag = "tdarr"
)]
pub async fn queue(
    State(ctx): State<AppContext>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<QueuePage>, AppError> {
    Ok(Json(ctx.integration.queue(&query).await?))
}
