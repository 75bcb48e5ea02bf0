//! The engine façade tying table acquisition to the aggregation fold.

use tracing::debug;

use crate::aggregate::aggregate;
use crate::config::EngineConfig;
use crate::data::{DashboardUpdate, SourcedRow};
use crate::filter::RowFilter;
use crate::ingestion::{IngestionManager, TableFetchStats};
use crate::source::TableSource;
use crate::types::TableName;

/// Provenance-tagged rows from one acquisition pass, before aggregation.
///
/// Callers that need the raw rows (to collect filter options, or to apply
/// several filters to one fetch) start here instead of `refresh`.
#[derive(Debug, Default)]
pub struct RowFetch {
    /// Every fetched row, tagged with its table and in-table index.
    pub rows: Vec<SourcedRow>,
    /// Tables that fetched successfully, in registration order.
    pub fetched_tables: Vec<TableName>,
    /// Per-table failure summary, `None` when every table succeeded.
    pub error: Option<String>,
}

/// Fetches registered tables and folds their rows into dashboard updates.
pub struct DashboardEngine {
    ingestion: IngestionManager,
}

impl DashboardEngine {
    /// Create an engine with no registered tables.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            ingestion: IngestionManager::new(config),
        }
    }

    /// Register a table for every subsequent refresh.
    pub fn register_table(&mut self, source: Box<dyn TableSource + 'static>) {
        self.ingestion.register_table(source);
    }

    /// Returns `true` when at least one table is registered.
    pub fn has_tables(&self) -> bool {
        self.ingestion.has_tables()
    }

    /// Latest fetch telemetry for each registered table.
    pub fn table_fetch_stats(&self) -> Vec<(TableName, TableFetchStats)> {
        self.ingestion.table_fetch_stats()
    }

    /// Fetch every table and tag rows with their provenance.
    pub fn fetch_rows(&mut self) -> RowFetch {
        let outcome = self.ingestion.fetch_all();
        let mut rows = Vec::new();
        let mut fetched_tables = Vec::with_capacity(outcome.tables.len());
        for (table, records) in outcome.tables {
            fetched_tables.push(table.clone());
            rows.extend(SourcedRow::tag_table(table, records));
        }
        RowFetch {
            rows,
            fetched_tables,
            error: describe_failures(&outcome.failures),
        }
    }

    /// Fetch every table and aggregate the full row set.
    pub fn refresh(&mut self) -> DashboardUpdate {
        self.refresh_filtered(&RowFilter::default())
    }

    /// Fetch every table, keep the rows the filter accepts, and aggregate.
    ///
    /// A failed table is reported in the update's `error` while the snapshot
    /// is still built from whatever fetched.
    pub fn refresh_filtered(&mut self, filter: &RowFilter) -> DashboardUpdate {
        let fetch = self.fetch_rows();
        let rows = filter.filter_rows(fetch.rows);
        debug!(
            rows = rows.len(),
            tables = fetch.fetched_tables.len(),
            "building dashboard snapshot"
        );
        DashboardUpdate {
            snapshot: aggregate(&rows),
            fetched_tables: fetch.fetched_tables,
            error: fetch.error,
        }
    }
}

fn describe_failures(failures: &[(TableName, String)]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }
    let summary = failures
        .iter()
        .map(|(_, reason)| reason.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Some(summary)
}
