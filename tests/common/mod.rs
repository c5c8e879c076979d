//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which starts a [`MockServer`] standing in for
//! Tdarr and writes a `default` config set pointing at it into a temporary
//! directory. The [`TestHarness::with_server`] constructor also starts the
//! Axum router on a random port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::MockServer;

use tdarr_bridge::config::FileConfigStore;
use tdarr_bridge::server::{create_router, AppContext};
use tdarr_bridge::{AppRef, QueueQuery, TdarrIntegration};

pub const TDARR_APP: &str = "tdarr-1";
pub const SONARR_APP: &str = "sonarr-1";
pub const CONFIG_SET: &str = "default";

/// Mock Tdarr plus a config directory that points at it.
pub struct TestHarness {
    pub tdarr: MockServer,
    pub configs: TempDir,
    pub integration: TdarrIntegration,
}

impl TestHarness {
    /// Tdarr app served at the root of the mock server.
    pub async fn new() -> Self {
        Self::with_base_path("").await
    }

    /// Tdarr app served under `base_path` (e.g. `/tdarr`).
    pub async fn with_base_path(base_path: &str) -> Self {
        let tdarr = MockServer::start().await;
        let configs = tempfile::tempdir().expect("failed to create config dir");

        let set = json!({
            "apps": [
                {
                    "id": TDARR_APP,
                    "name": "Tdarr",
                    "url": format!("{}{}/", tdarr.uri(), base_path),
                    "integration": { "type": "tdarr", "properties": [] }
                },
                {
                    "id": SONARR_APP,
                    "name": "Sonarr",
                    "url": "http://sonarr.invalid:8989",
                    "integration": { "type": "sonarr", "properties": [] }
                },
                {
                    "id": "offline-tdarr",
                    "name": "Offline Tdarr",
                    "url": "http://127.0.0.1:1",
                    "integration": { "type": "tdarr", "properties": [] }
                }
            ]
        });
        std::fs::write(
            configs.path().join(format!("{CONFIG_SET}.json")),
            serde_json::to_vec_pretty(&set).unwrap(),
        )
        .expect("failed to write config set");

        let store = FileConfigStore::new(configs.path());
        let integration = TdarrIntegration::new(Arc::new(store));

        Self {
            tdarr,
            configs,
            integration,
        }
    }

    /// Start the Axum router on a random port and return the harness
    /// together with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new().await;
        let app = create_router(harness.context());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn context(&self) -> AppContext {
        AppContext::new(self.integration.clone())
    }

    pub fn app(&self) -> AppRef {
        app_ref(TDARR_APP)
    }

    pub fn queue_query(&self, page: u64, page_size: u64, health_checks: bool) -> QueueQuery {
        QueueQuery {
            app_id: TDARR_APP.into(),
            config_name: CONFIG_SET.into(),
            show_health_checks_in_queue: health_checks,
            page_size,
            page,
        }
    }

    /// JSON bodies of every request the mock server received.
    pub async fn request_bodies(&self) -> Vec<Value> {
        self.tdarr
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.body_json::<Value>().unwrap_or(Value::Null))
            .collect()
    }
}

pub fn app_ref(app_id: &str) -> AppRef {
    AppRef {
        app_id: app_id.into(),
        config_name: CONFIG_SET.into(),
    }
}

// ---------------------------------------------------------------------------
// Upstream fixtures
// ---------------------------------------------------------------------------

fn segments(pairs: &[(&str, u64)]) -> Value {
    Value::Array(
        pairs
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect(),
    )
}

pub fn statistics_body() -> Value {
    json!({
        "_id": "statistics",
        "totalFileCount": 250,
        "totalTranscodeCount": 80,
        "totalHealthCheckCount": 200,
        "table0Count": 0,
        "table1Count": 12,
        "table2Count": 60,
        "table3Count": 4,
        "table4Count": 7,
        "table5Count": 190,
        "table6Count": 3,
        "sizeDiff": 12.5,
        "pies": [
            [
                "Movies",
                "lib-movies",
                150,
                50,
                10240.5,
                120,
                segments(&[("Transcode success", 45), ("Not required", 5)]),
                segments(&[("Success", 118), ("Error", 2)]),
                segments(&[("hevc", 90), ("h264", 60)]),
                segments(&[("mkv", 140), ("mp4", 10)]),
                segments(&[("1080p", 100), ("4KUHD", 50)]),
                segments(&[("eac3", 80), ("aac", 70)]),
                segments(&[("mkv", 140), ("mp4", 10)])
            ],
            [
                "Shows",
                "lib-shows",
                100,
                30,
                0,
                80,
                [],
                [],
                segments(&[("h264", 100)]),
                segments(&[("mkv", 100)]),
                segments(&[("720p", 100)]),
                segments(&[("aac", 100)]),
                segments(&[("mkv", 100)])
            ]
        ]
    })
}

pub fn worker(id: &str, file: &str, step: Option<&str>) -> Value {
    let mut worker = json!({
        "_id": id,
        "file": file,
        "fps": 48.0,
        "percentage": 37.5,
        "ETA": "00:12:40",
        "job": { "type": "transcode", "jobId": "job-1" },
        "status": "Processing",
        "originalfileSizeInGbytes": 4200.0,
        "estSize": 2100.0,
        "outputFileSizeInGbytes": 800.0,
        "workerType": "transcodegpu"
    });
    if let Some(step) = step {
        worker["lastPluginDetails"] = json!({ "id": "plugin", "number": step });
    }
    worker
}

pub fn nodes_body() -> Value {
    json!({
        "node-b": {
            "_id": "node-b",
            "nodeName": "beta",
            "nodePaused": true,
            "workers": {
                "w-3": worker("w-3", "/media/shows/s01e01.mkv", None)
            }
        },
        "node-a": {
            "_id": "node-a",
            "nodeName": "alpha",
            "nodePaused": false,
            "workers": {
                "w-2": worker("w-2", "/media/movies/b.mkv", Some("3")),
                "w-1": worker("w-1", "/media/movies/a.mkv", Some("1"))
            }
        }
    })
}

pub fn queue_row(file: &str) -> Value {
    json!({
        "_id": file,
        "HealthCheck": "Queued",
        "TranscodeDecisionMaker": "Queued",
        "file": file,
        "file_size": 1500.25,
        "container": "mkv",
        "video_codec_name": "h264",
        "video_resolution": "1080p",
        "bumped": false
    })
}

/// A status-table page holding `files`, reporting `total_count`.
pub fn status_table_body(files: &[&str], total_count: u64) -> Value {
    json!({
        "array": files.iter().map(|f| queue_row(f)).collect::<Vec<_>>(),
        "totalCount": total_count
    })
}
