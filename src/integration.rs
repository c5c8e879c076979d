//! The three dashboard operations.
//!
//! Each call resolves the app from its configuration set, talks to Tdarr and
//! returns the remapped result. Nothing is shared between calls apart from
//! the HTTP connection pool.

use std::sync::Arc;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{ConfigStore, IntegrationKind};
use crate::error::Result;
use crate::tdarr::{
    fetch_queue_page, flatten_workers, QueuePage, QueuePageRequest, Statistics, TdarrClient,
    Worker,
};

/// Identifies an app inside a configuration set.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AppRef {
    pub app_id: String,
    pub config_name: String,
}

/// Input of the queue operation.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QueueQuery {
    pub app_id: String,
    pub config_name: String,
    /// Append the health-check queue after the transcode queue.
    #[serde(default)]
    pub show_health_checks_in_queue: bool,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Zero-based page index.
    #[serde(default)]
    pub page: u64,
}

fn default_page_size() -> u64 {
    10
}

impl QueueQuery {
    pub fn app_ref(&self) -> AppRef {
        AppRef {
            app_id: self.app_id.clone(),
            config_name: self.config_name.clone(),
        }
    }

    pub fn page_request(&self) -> QueuePageRequest {
        QueuePageRequest {
            page: self.page,
            page_size: self.page_size,
            include_health_checks: self.show_health_checks_in_queue,
        }
    }
}

/// Entry point for the statistics, workers and queue operations.
#[derive(Clone)]
pub struct TdarrIntegration {
    store: Arc<dyn ConfigStore>,
    http: reqwest::Client,
}

impl TdarrIntegration {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self::with_http_client(store, reqwest::Client::new())
    }

    pub fn with_http_client(store: Arc<dyn ConfigStore>, http: reqwest::Client) -> Self {
        Self { store, http }
    }

    /// Resolve the app and build a client for it.
    async fn connect(&self, app: &AppRef) -> Result<TdarrClient> {
        let set = self.store.load(&app.config_name).await?;
        let descriptor = set.resolve(&app.app_id, IntegrationKind::Tdarr)?;
        tracing::debug!(
            app_id = %descriptor.app_id,
            config = %app.config_name,
            url = %descriptor.base_url,
            "Resolved Tdarr app"
        );
        Ok(TdarrClient::new(self.http.clone(), &descriptor))
    }

    /// Library statistics and instance-wide counters.
    pub async fn statistics(&self, app: &AppRef) -> Result<Statistics> {
        let client = self.connect(app).await?;
        Ok(client.statistics().await?.into())
    }

    /// Every worker currently running on any node.
    pub async fn workers(&self, app: &AppRef) -> Result<Vec<Worker>> {
        let client = self.connect(app).await?;
        Ok(flatten_workers(client.nodes().await?))
    }

    /// One page of the transcode queue, optionally followed by health checks.
    pub async fn queue(&self, query: &QueueQuery) -> Result<QueuePage> {
        let client = self.connect(&query.app_ref()).await?;
        fetch_queue_page(&client, query.page_request()).await
    }
}
