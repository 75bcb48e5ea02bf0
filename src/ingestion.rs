use crate::config::EngineConfig;
use crate::constants::acquisition::FETCH_PANIC_REASON;
use crate::data::Record;
use crate::errors::EngineError;
use crate::source::{TableCursor, TableSource};
use crate::types::TableName;
use indexmap::IndexMap;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-table fetch telemetry captured by the most recent refresh.
#[derive(Clone, Debug, Default)]
pub struct TableFetchStats {
    /// Duration of the most recent fetch in milliseconds.
    pub last_fetch_ms: u128,
    /// Rows returned by the most recent fetch.
    pub last_row_count: usize,
    /// Pages drained by the most recent fetch.
    pub last_page_count: usize,
    /// Last fetch error message, if any.
    pub last_error: Option<String>,
    /// Total fetch failures seen for this table.
    pub error_count: u64,
}

/// Outcome of one concurrent acquisition pass.
///
/// Tables keep registration order; a failed table appears in `failures`
/// and nowhere else.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Rows per successfully fetched table.
    pub tables: IndexMap<TableName, Vec<Record>>,
    /// Failure description per table that did not survive the pass.
    pub failures: Vec<(TableName, String)>,
}

/// Rows plus page count drained from one table.
struct DrainedTable {
    rows: Vec<Record>,
    pages: usize,
}

/// Per-table acquisition runtime state.
struct TableState {
    source: Box<dyn TableSource + 'static>,
    stats: TableFetchStats,
}

/// Coordinates concurrent page-draining fetches across registered tables.
///
/// Each refresh runs one scoped thread per table; a table that fails or
/// panics is reported and skipped without disturbing the others.
pub struct IngestionManager {
    tables: Vec<TableState>,
    config: EngineConfig,
}

impl IngestionManager {
    /// Create a manager with no registered tables.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            tables: Vec::new(),
            config,
        }
    }

    /// Register a table for acquisition.
    pub fn register_table(&mut self, source: Box<dyn TableSource + 'static>) {
        self.tables.push(TableState {
            source,
            stats: TableFetchStats::default(),
        });
    }

    /// Returns `true` when at least one table is registered.
    pub fn has_tables(&self) -> bool {
        !self.tables.is_empty()
    }

    /// Registered table names in registration order.
    pub fn table_names(&self) -> Vec<TableName> {
        self.tables
            .iter()
            .map(|state| state.source.name().to_string())
            .collect()
    }

    /// Latest fetch telemetry for each registered table.
    pub fn table_fetch_stats(&self) -> Vec<(TableName, TableFetchStats)> {
        self.tables
            .iter()
            .map(|state| (state.source.name().to_string(), state.stats.clone()))
            .collect()
    }

    /// Fetch every registered table once, in parallel.
    pub fn fetch_all(&mut self) -> FetchOutcome {
        // A zero page size would never drain; treat it as one row per page.
        let page_size = self.config.page_size.max(1);
        let max_rows = self.config.max_rows_per_table;

        let mut results: Vec<Option<(Result<DrainedTable, EngineError>, Duration)>> =
            Vec::with_capacity(self.tables.len());
        results.resize_with(self.tables.len(), || None);
        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.tables.len());
            for (idx, state) in self.tables.iter().enumerate() {
                let source = &state.source;
                handles.push((
                    idx,
                    scope.spawn(move || {
                        let start = Instant::now();
                        let result = drain_table(source.as_ref(), page_size, max_rows);
                        (result, start.elapsed())
                    }),
                ));
            }
            for (idx, handle) in handles {
                let outcome = match handle.join() {
                    Ok((result, elapsed)) => (result, elapsed),
                    Err(_) => (
                        Err(EngineError::TableUnavailable {
                            table: self.tables[idx].source.name().to_string(),
                            reason: FETCH_PANIC_REASON.into(),
                        }),
                        Duration::from_secs(0),
                    ),
                };
                results[idx] = Some(outcome);
            }
        });

        let mut outcome = FetchOutcome::default();
        for (idx, slot) in results.into_iter().enumerate() {
            let Some((result, elapsed)) = slot else {
                continue;
            };
            let table = self.tables[idx].source.name().to_string();
            let stats = &mut self.tables[idx].stats;
            stats.last_fetch_ms = elapsed.as_millis();
            match result {
                Ok(drained) => {
                    stats.last_row_count = drained.rows.len();
                    stats.last_page_count = drained.pages;
                    stats.last_error = None;
                    debug!(
                        table = %table,
                        rows = drained.rows.len(),
                        pages = drained.pages,
                        fetch_ms = elapsed.as_millis(),
                        "table fetch completed"
                    );
                    outcome.tables.insert(table, drained.rows);
                }
                Err(err) => {
                    stats.last_row_count = 0;
                    stats.last_page_count = 0;
                    stats.last_error = Some(err.to_string());
                    stats.error_count = stats.error_count.saturating_add(1);
                    eprintln!("[funnelboard] table '{table}' fetch failed: {err}");
                    outcome.failures.push((table, err.to_string()));
                }
            }
        }
        outcome
    }
}

/// Drain one table through sequential pages until a short or empty page.
fn drain_table(
    source: &dyn TableSource,
    page_size: usize,
    max_rows: usize,
) -> Result<DrainedTable, EngineError> {
    let mut rows = Vec::new();
    let mut pages = 0usize;
    let mut cursor: Option<TableCursor> = None;
    while rows.len() < max_rows {
        let limit = page_size.min(max_rows - rows.len());
        let page = source.fetch(cursor.as_ref(), Some(limit))?;
        pages += 1;
        let fetched = page.rows.len();
        rows.extend(page.rows);
        cursor = Some(page.cursor);
        if fetched < limit {
            break;
        }
    }
    Ok(DrainedTable { rows, pages })
}
