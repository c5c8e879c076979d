use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::queue::{StatusTable, StatusTableSource};
use super::schema::{NodesResponse, StatisticsDocument, StatusTablePage};
use crate::config::ConnectionDescriptor;
use crate::error::{Error, Result};

const CRUDDB: &str = "/api/v2/cruddb";
const GET_NODES: &str = "/api/v2/get-nodes";
const STATUS_TABLES: &str = "/api/v2/client/status-tables";

/// Every Tdarr v2 POST body is wrapped in `{"data": ...}`.
#[derive(Serialize)]
struct Envelope<T> {
    data: T,
}

/// HTTP client for one Tdarr app.
///
/// Requests are sent once; there is no retry and no timeout beyond what the
/// shared [`Client`] was built with.
pub struct TdarrClient {
    client: Client,
    base_url: String,
}

impl TdarrClient {
    pub fn new(client: Client, descriptor: &ConnectionDescriptor) -> Self {
        Self {
            client,
            base_url: descriptor.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T> {
        let url = self.url(endpoint);
        tracing::debug!(endpoint, url = %url, "Tdarr GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| Error::Transport { endpoint, source })?;

        decode(endpoint, response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(endpoint);
        tracing::debug!(endpoint, url = %url, "Tdarr POST");

        let response = self
            .client
            .post(&url)
            .json(&Envelope { data: body })
            .send()
            .await
            .map_err(|source| Error::Transport { endpoint, source })?;

        decode(endpoint, response).await
    }

    /// Fetch the stored statistics document.
    pub async fn statistics(&self) -> Result<StatisticsDocument> {
        #[derive(Serialize)]
        struct GetById {
            collection: &'static str,
            mode: &'static str,
            #[serde(rename = "docID")]
            doc_id: &'static str,
        }

        let request = GetById {
            collection: "StatisticsJSONDB",
            mode: "getById",
            doc_id: "statistics",
        };

        self.post(CRUDDB, &request).await
    }

    /// Fetch all processing nodes with their running workers.
    pub async fn nodes(&self) -> Result<NodesResponse> {
        self.get(GET_NODES).await
    }

    /// Fetch one page of a status table.
    pub async fn status_table(
        &self,
        table: StatusTable,
        start: u64,
        page_size: u64,
    ) -> Result<StatusTablePage> {
        #[derive(Serialize)]
        struct TableOpts {
            table: &'static str,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct StatusTableQuery {
            start: u64,
            page_size: u64,
            filters: Vec<serde_json::Value>,
            sorts: Vec<serde_json::Value>,
            opts: TableOpts,
        }

        let request = StatusTableQuery {
            start,
            page_size,
            filters: Vec::new(),
            sorts: Vec::new(),
            opts: TableOpts {
                table: table.table_id(),
            },
        };

        self.post(STATUS_TABLES, &request).await
    }
}

#[async_trait::async_trait]
impl StatusTableSource for TdarrClient {
    async fn fetch_page(
        &self,
        table: StatusTable,
        start: u64,
        page_size: u64,
    ) -> Result<StatusTablePage> {
        self.status_table(table, start, page_size).await
    }
}

/// Check the status and validate the body against `T`.
async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<T> {
    let response = response
        .error_for_status()
        .map_err(|source| Error::Transport { endpoint, source })?;

    let body = response
        .bytes()
        .await
        .map_err(|source| Error::Transport { endpoint, source })?;

    serde_json::from_slice(&body).map_err(|source| {
        tracing::debug!(endpoint, error = %source, "Tdarr response failed validation");
        Error::SchemaViolation { endpoint, source }
    })
}
