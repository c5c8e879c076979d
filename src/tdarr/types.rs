//! Output types handed to the dashboard, and the remapping from the
//! validated upstream shapes in [`super::schema`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::schema::{LibraryPieRow, NodesResponse, QueueRow, StatisticsDocument, WorkerRecord};

/// Bytes per (decimal) megabyte.
pub const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

/// Bytes per (decimal) gigabyte.
pub const BYTES_PER_GIGABYTE: f64 = 1_000_000_000.0;

pub fn megabytes_to_bytes(megabytes: f64) -> f64 {
    megabytes * BYTES_PER_MEGABYTE
}

pub fn gigabytes_to_bytes(gigabytes: f64) -> f64 {
    gigabytes * BYTES_PER_GIGABYTE
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Aggregate statistics for the whole Tdarr instance.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_file_count: u64,
    pub total_transcode_count: u64,
    pub total_health_check_count: u64,
    pub failed_transcode_count: u64,
    pub failed_health_check_count: u64,
    pub staged_transcode_count: u64,
    pub staged_health_check_count: u64,
    /// Space saved across all libraries, in bytes.
    pub total_saved_space: f64,
    pub libraries: Vec<LibraryPie>,
}

/// Per-library totals and category breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPie {
    pub library_id: String,
    pub library_name: String,
    pub total_files: u64,
    pub total_transcodes: u64,
    /// Space saved in this library, in bytes.
    pub saved_space: f64,
    pub total_health_checks: u64,
    pub transcode_status: Vec<PieSegment>,
    pub health_check_status: Vec<PieSegment>,
    pub video_codecs: Vec<PieSegment>,
    pub video_containers: Vec<PieSegment>,
    pub video_resolutions: Vec<PieSegment>,
    pub audio_codecs: Vec<PieSegment>,
    pub audio_containers: Vec<PieSegment>,
}

/// One slice of a category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PieSegment {
    pub name: String,
    pub value: u64,
}

impl From<StatisticsDocument> for Statistics {
    fn from(doc: StatisticsDocument) -> Self {
        Self {
            total_file_count: doc.total_file_count,
            total_transcode_count: doc.total_transcode_count,
            total_health_check_count: doc.total_health_check_count,
            // The tableN counters are positional upstream; this mapping is fixed.
            failed_transcode_count: doc.table3_count,
            failed_health_check_count: doc.table6_count,
            staged_transcode_count: doc.table1_count,
            staged_health_check_count: doc.table4_count,
            total_saved_space: gigabytes_to_bytes(doc.size_diff),
            libraries: doc.pies.into_iter().map(LibraryPie::from).collect(),
        }
    }
}

impl From<LibraryPieRow> for LibraryPie {
    fn from(row: LibraryPieRow) -> Self {
        Self {
            library_id: row.library_id,
            library_name: row.library_name,
            total_files: row.file_count,
            total_transcodes: row.transcode_count,
            saved_space: megabytes_to_bytes(row.saved_space_mb),
            total_health_checks: row.health_check_count,
            transcode_status: row.transcode_status,
            health_check_status: row.health_check_status,
            video_codecs: row.video_codecs,
            video_containers: row.video_containers,
            video_resolutions: row.video_resolutions,
            audio_codecs: row.audio_codecs,
            audio_containers: row.audio_containers,
        }
    }
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

/// A job slot currently running on a Tdarr node.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub file_path: String,
    pub fps: f64,
    pub percentage: f64,
    /// Remaining time as formatted by Tdarr.
    pub eta: String,
    pub job_type: String,
    pub status: String,
    /// Current plugin step, empty when Tdarr has not reported one.
    pub step: String,
    pub original_size: f64,
    pub estimated_size: f64,
    pub output_size: f64,
}

impl From<WorkerRecord> for Worker {
    fn from(record: WorkerRecord) -> Self {
        Self {
            id: record.id,
            file_path: record.file,
            fps: record.fps,
            percentage: record.percentage,
            eta: record.eta,
            job_type: record.job.kind,
            status: record.status,
            step: record
                .last_plugin_details
                .and_then(|details| details.number)
                .unwrap_or_default(),
            original_size: megabytes_to_bytes(record.original_file_size),
            estimated_size: megabytes_to_bytes(record.estimated_size.unwrap_or(0.0)),
            output_size: megabytes_to_bytes(record.output_file_size.unwrap_or(0.0)),
        }
    }
}

/// Collect the workers of every node into one list.
///
/// Node identity and pause state are dropped. Output follows key order of
/// the upstream maps, which carries no meaning.
pub fn flatten_workers(nodes: NodesResponse) -> Vec<Worker> {
    nodes
        .into_values()
        .flat_map(|node| node.workers.into_values())
        .map(Worker::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

/// Which upstream table a queue entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum QueueEntryKind {
    #[serde(rename = "transcode")]
    Transcode,
    #[serde(rename = "health check")]
    HealthCheck,
}

/// A file waiting for a transcode or a health check.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    pub health_check: String,
    pub transcode: String,
    pub file_path: String,
    pub file_size: f64,
    pub container: String,
    pub codec: String,
    pub resolution: String,
    #[serde(rename = "type")]
    pub kind: QueueEntryKind,
}

impl QueueEntry {
    pub fn from_row(row: QueueRow, kind: QueueEntryKind) -> Self {
        Self {
            id: row.id,
            health_check: row.health_check,
            transcode: row.transcode_decision,
            file_path: row.file,
            file_size: megabytes_to_bytes(row.file_size),
            container: row.container,
            codec: row.video_codec_name,
            resolution: row.video_resolution,
            kind,
        }
    }
}

/// One window over the virtual "transcodes then health checks" sequence.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueuePage {
    pub entries: Vec<QueueEntry>,
    pub total_count: u64,
    pub start_index: i64,
    /// Index of the last entry; `start_index - 1` for an empty page.
    pub end_index: i64,
}

impl QueuePage {
    pub fn new(entries: Vec<QueueEntry>, total_count: u64, first_item_index: u64) -> Self {
        let start_index = i64::try_from(first_item_index).unwrap_or(i64::MAX);
        let len = i64::try_from(entries.len()).unwrap_or(i64::MAX);
        Self {
            end_index: start_index.saturating_add(len) - 1,
            entries,
            total_count,
            start_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn worker_json() -> serde_json::Value {
        json!({
            "_id": "w1",
            "file": "/media/a.mkv",
            "fps": 42.5,
            "percentage": 12.0,
            "ETA": "0:10:00",
            "job": { "type": "transcode" },
            "status": "Processing",
            "lastPluginDetails": { "number": "2" },
            "originalfileSizeInGbytes": 1500.0,
            "estSize": 700.5,
            "outputFileSizeInGbytes": 120.0,
            "workerType": "transcodegpu"
        })
    }

    #[test]
    fn pie_saved_space_is_converted_to_bytes() {
        for mb in [0.0, 1.0, 2.5, 1234.567] {
            let row: LibraryPieRow = serde_json::from_value(json!([
                "Movies", "lib1", 10, 4, mb, 6, [], [], [], [], [], [], []
            ]))
            .unwrap();
            assert_eq!(LibraryPie::from(row).saved_space, mb * 1_000_000.0);
        }
    }

    #[test]
    fn statistics_counters_keep_upstream_mapping() {
        let doc: StatisticsDocument = serde_json::from_value(json!({
            "totalFileCount": 100,
            "totalTranscodeCount": 50,
            "totalHealthCheckCount": 40,
            "table1Count": 1,
            "table3Count": 3,
            "table4Count": 4,
            "table6Count": 6,
            "sizeDiff": 1.5,
            "pies": []
        }))
        .unwrap();

        let stats = Statistics::from(doc);
        assert_eq!(stats.staged_transcode_count, 1);
        assert_eq!(stats.failed_transcode_count, 3);
        assert_eq!(stats.staged_health_check_count, 4);
        assert_eq!(stats.failed_health_check_count, 6);
        assert_eq!(stats.total_saved_space, 1_500_000_000.0);
        assert!(stats.libraries.is_empty());
    }

    #[test]
    fn worker_remap() {
        let record: WorkerRecord = serde_json::from_value(worker_json()).unwrap();
        let worker = Worker::from(record);
        assert_eq!(worker.id, "w1");
        assert_eq!(worker.file_path, "/media/a.mkv");
        assert_eq!(worker.eta, "0:10:00");
        assert_eq!(worker.job_type, "transcode");
        assert_eq!(worker.step, "2");
        assert_eq!(worker.original_size, 1_500_000_000.0);
        assert_eq!(worker.estimated_size, 700_500_000.0);
        assert_eq!(worker.output_size, 120_000_000.0);
    }

    #[test]
    fn worker_step_empty_without_plugin_details() {
        let mut value = worker_json();
        value.as_object_mut().unwrap().remove("lastPluginDetails");
        let worker = Worker::from(serde_json::from_value::<WorkerRecord>(value).unwrap());
        assert_eq!(worker.step, "");
    }

    #[test]
    fn worker_missing_optional_sizes_are_zero() {
        let mut value = worker_json();
        let obj = value.as_object_mut().unwrap();
        obj.remove("estSize");
        obj.remove("outputFileSizeInGbytes");
        let worker = Worker::from(serde_json::from_value::<WorkerRecord>(value).unwrap());
        assert_eq!(worker.estimated_size, 0.0);
        assert_eq!(worker.output_size, 0.0);
    }

    #[test]
    fn flatten_drops_node_level_fields() {
        let nodes: NodesResponse = serde_json::from_value(json!({
            "nodeB": {
                "_id": "nodeB",
                "nodeName": "beta",
                "nodePaused": true,
                "workers": { "w2": worker_json() }
            },
            "nodeA": {
                "_id": "nodeA",
                "nodeName": "alpha",
                "nodePaused": false,
                "workers": {}
            }
        }))
        .unwrap();

        let workers = flatten_workers(nodes);
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].id, "w1");
    }

    #[test]
    fn queue_entry_kind_serializes_as_tag() {
        assert_eq!(
            serde_json::to_value(QueueEntryKind::HealthCheck).unwrap(),
            json!("health check")
        );
        assert_eq!(
            serde_json::to_value(QueueEntryKind::Transcode).unwrap(),
            json!("transcode")
        );
    }

    #[test]
    fn empty_page_ends_before_it_starts() {
        let page = QueuePage::new(Vec::new(), 0, 0);
        assert_eq!(page.start_index, 0);
        assert_eq!(page.end_index, -1);
    }
}
