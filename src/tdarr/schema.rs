//! Upstream response shapes.
//!
//! Deserializing into these types is the validation step: a missing or
//! mistyped field fails the whole response. Unknown fields are ignored.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::Deserialize;

use super::types::PieSegment;

// ---------------------------------------------------------------------------
// Statistics document
// ---------------------------------------------------------------------------

/// The stored `statistics` document from `StatisticsJSONDB`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDocument {
    pub total_file_count: u64,
    pub total_transcode_count: u64,
    pub total_health_check_count: u64,
    /// Transcode queue size.
    pub table1_count: u64,
    /// Transcode errors.
    pub table3_count: u64,
    /// Health-check queue size.
    pub table4_count: u64,
    /// Health-check errors.
    pub table6_count: u64,
    /// Total space saved, in GB.
    pub size_diff: f64,
    pub pies: Vec<LibraryPieRow>,
}

/// Column order of a `pies` row. Tdarr sends each library as a bare array,
/// so this order is the contract.
pub const PIE_COLUMNS: [&str; 13] = [
    "library name",
    "library id",
    "file count",
    "transcode count",
    "space saved (MB)",
    "health check count",
    "transcode status",
    "health check status",
    "video codecs",
    "video containers",
    "video resolutions",
    "audio codecs",
    "audio containers",
];

/// One library row of the statistics document, parsed column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryPieRow {
    pub library_name: String,
    pub library_id: String,
    pub file_count: u64,
    pub transcode_count: u64,
    pub saved_space_mb: f64,
    pub health_check_count: u64,
    pub transcode_status: Vec<PieSegment>,
    pub health_check_status: Vec<PieSegment>,
    pub video_codecs: Vec<PieSegment>,
    pub video_containers: Vec<PieSegment>,
    pub video_resolutions: Vec<PieSegment>,
    pub audio_codecs: Vec<PieSegment>,
    pub audio_containers: Vec<PieSegment>,
}

impl<'de> Deserialize<'de> for LibraryPieRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(LibraryPieRowVisitor)
    }
}

struct LibraryPieRowVisitor;

const PIE_ROW_EXPECTED: &str = "a library pie row of 13 columns";

/// Read the column at `index`, naming it in the error.
fn column<'de, T, A>(seq: &mut A, index: usize) -> Result<T, A::Error>
where
    T: Deserialize<'de>,
    A: SeqAccess<'de>,
{
    seq.next_element::<T>()
        .map_err(|e| de::Error::custom(format!("column {index} ({}): {e}", PIE_COLUMNS[index])))?
        .ok_or_else(|| de::Error::invalid_length(index, &PIE_ROW_EXPECTED))
}

impl<'de> Visitor<'de> for LibraryPieRowVisitor {
    type Value = LibraryPieRow;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(PIE_ROW_EXPECTED)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let row = LibraryPieRow {
            library_name: column(&mut seq, 0)?,
            library_id: column(&mut seq, 1)?,
            file_count: column(&mut seq, 2)?,
            transcode_count: column(&mut seq, 3)?,
            saved_space_mb: column(&mut seq, 4)?,
            health_check_count: column(&mut seq, 5)?,
            transcode_status: column(&mut seq, 6)?,
            health_check_status: column(&mut seq, 7)?,
            video_codecs: column(&mut seq, 8)?,
            video_containers: column(&mut seq, 9)?,
            video_resolutions: column(&mut seq, 10)?,
            audio_codecs: column(&mut seq, 11)?,
            audio_containers: column(&mut seq, 12)?,
        };

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(PIE_COLUMNS.len() + 1, &PIE_ROW_EXPECTED));
        }

        Ok(row)
    }
}

// ---------------------------------------------------------------------------
// Nodes and workers
// ---------------------------------------------------------------------------

/// `get-nodes` response: node id to node.
pub type NodesResponse = BTreeMap<String, NodeRecord>;

#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nodeName")]
    pub node_name: String,
    #[serde(rename = "nodePaused")]
    pub node_paused: bool,
    pub workers: BTreeMap<String, WorkerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub file: String,
    pub fps: f64,
    pub percentage: f64,
    #[serde(rename = "ETA")]
    pub eta: String,
    pub job: WorkerJob,
    pub status: String,
    #[serde(rename = "lastPluginDetails", default)]
    pub last_plugin_details: Option<PluginDetails>,
    #[serde(rename = "originalfileSizeInGbytes")]
    pub original_file_size: f64,
    #[serde(rename = "estSize", default)]
    pub estimated_size: Option<f64>,
    #[serde(rename = "outputFileSizeInGbytes", default)]
    pub output_file_size: Option<f64>,
    #[serde(rename = "workerType")]
    pub worker_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerJob {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginDetails {
    #[serde(default)]
    pub number: Option<String>,
}

// ---------------------------------------------------------------------------
// Status tables
// ---------------------------------------------------------------------------

/// One page of a `status-tables` query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTablePage {
    pub array: Vec<QueueRow>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueRow {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "HealthCheck")]
    pub health_check: String,
    #[serde(rename = "TranscodeDecisionMaker")]
    pub transcode_decision: String,
    pub file: String,
    /// File size in MB.
    pub file_size: f64,
    pub container: String,
    pub video_codec_name: String,
    pub video_resolution: String,
}
