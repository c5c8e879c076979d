//! Virtual pagination over the transcode and health-check queues.
//!
//! Tdarr stores the two queues as separate status tables. The dashboard sees
//! them as one sequence: every transcode entry, then every health-check
//! entry. A page of that sequence is built from one page of each table.

use async_trait::async_trait;

use super::schema::StatusTablePage;
use super::types::{QueueEntry, QueueEntryKind, QueuePage};
use crate::error::{Error, Result};

/// The status tables that make up the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTable {
    Transcode,
    HealthCheck,
}

impl StatusTable {
    /// Upstream table identifier.
    pub fn table_id(self) -> &'static str {
        match self {
            StatusTable::Transcode => "table1",
            StatusTable::HealthCheck => "table4",
        }
    }

    pub fn entry_kind(self) -> QueueEntryKind {
        match self {
            StatusTable::Transcode => QueueEntryKind::Transcode,
            StatusTable::HealthCheck => QueueEntryKind::HealthCheck,
        }
    }
}

/// Anything that can serve a page of a status table.
#[async_trait]
pub trait StatusTableSource: Send + Sync {
    async fn fetch_page(
        &self,
        table: StatusTable,
        start: u64,
        page_size: u64,
    ) -> Result<StatusTablePage>;
}

/// Which window of the combined queue to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuePageRequest {
    /// Zero-based page index.
    pub page: u64,
    pub page_size: u64,
    pub include_health_checks: bool,
}

impl QueuePageRequest {
    pub fn first_item_index(&self) -> u64 {
        self.page.saturating_mul(self.page_size)
    }
}

/// Offset into the health-check table for a page starting at
/// `first_item_index` of the combined sequence.
pub fn health_check_offset(first_item_index: u64, transcode_total: u64) -> u64 {
    first_item_index.saturating_sub(transcode_total)
}

fn into_entries(page: StatusTablePage, table: StatusTable) -> Vec<QueueEntry> {
    let kind = table.entry_kind();
    page.array
        .into_iter()
        .map(|row| QueueEntry::from_row(row, kind))
        .collect()
}

/// Build one page of the combined queue.
///
/// The transcode page is always fetched first. When health checks are
/// included, the health-check page is fetched afterwards even if the
/// transcode page already fills the window; the concatenation is then cut
/// to `page_size`.
pub async fn fetch_queue_page<S>(source: &S, request: QueuePageRequest) -> Result<QueuePage>
where
    S: StatusTableSource + ?Sized,
{
    if request.page_size == 0 {
        return Err(Error::Validation("pageSize must be greater than 0".into()));
    }

    let page_size = request.page_size;
    let window = usize::try_from(page_size).unwrap_or(usize::MAX);
    let first_item_index = request.first_item_index();

    let transcodes = source
        .fetch_page(StatusTable::Transcode, first_item_index, page_size)
        .await?;
    let transcode_total = transcodes.total_count;
    let mut entries = into_entries(transcodes, StatusTable::Transcode);

    if !request.include_health_checks {
        entries.truncate(window);
        return Ok(QueuePage::new(entries, transcode_total, first_item_index));
    }

    let offset = health_check_offset(first_item_index, transcode_total);
    tracing::debug!(
        first_item_index,
        transcode_total,
        health_check_offset = offset,
        "Fetching health-check queue page"
    );

    let health_checks = source
        .fetch_page(StatusTable::HealthCheck, offset, page_size)
        .await?;
    let total_count = transcode_total.saturating_add(health_checks.total_count);

    entries.extend(into_entries(health_checks, StatusTable::HealthCheck));
    entries.truncate(window);

    Ok(QueuePage::new(entries, total_count, first_item_index))
}
