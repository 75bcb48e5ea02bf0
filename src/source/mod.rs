//! Table interfaces and the paging contract.
//!
//! Ownership model:
//! - `TableSource` is the engine-facing interface that produces row pages.
//! - `TableCursor` is source-owned position state; the engine stores it
//!   between fetch calls and never interprets it.
//! - `InMemoryTable` backs tests and embedded datasets.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::data::Record;
use crate::errors::EngineError;
use crate::types::TableName;

/// Source-owned paging position.
///
/// The engine passes the cursor from one fetch into the next to continue
/// draining a table.
#[derive(Clone, Debug)]
pub struct TableCursor {
    /// When the page this cursor continues from was produced.
    pub last_seen: DateTime<Utc>,
    /// Offset of the next row to fetch.
    pub offset: u64,
}

/// Result of a single fetch call.
#[derive(Clone, Debug)]
pub struct TablePage {
    /// Rows in table order for this page.
    pub rows: Vec<Record>,
    /// Cursor to pass into the next fetch call.
    pub cursor: TableCursor,
}

/// Engine-facing table interface.
///
/// Paging is sequential and bounded: fetching with the cursor returned by
/// the previous call yields the rows immediately after that page, and a
/// cursor at or past the end yields an empty page instead of wrapping
/// around. For a fixed table state the drained pages concatenate to the
/// full table exactly once.
pub trait TableSource: Send + Sync {
    /// Table name used in provenance tags, telemetry, and error reports.
    fn name(&self) -> &str;

    /// Fetch up to `limit` rows starting at `cursor`.
    ///
    /// `None` as cursor starts from the first row; `None` as limit returns
    /// everything that remains.
    fn fetch(
        &self,
        cursor: Option<&TableCursor>,
        limit: Option<usize>,
    ) -> Result<TablePage, EngineError>;

    /// Exact row count reported by the backend.
    ///
    /// Return `Err` when exact counting is not possible or the table is
    /// unavailable. Keep this consistent with `fetch` by using the same
    /// backend scope and filtering.
    fn reported_row_count(&self) -> Result<u64, EngineError>;
}

/// In-memory table for tests and embedded datasets.
pub struct InMemoryTable {
    name: TableName,
    rows: Arc<Vec<Record>>,
}

impl InMemoryTable {
    /// Create an in-memory table from prebuilt rows.
    pub fn new(name: impl Into<TableName>, rows: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            rows: Arc::new(rows),
        }
    }
}

impl TableSource for InMemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(
        &self,
        cursor: Option<&TableCursor>,
        limit: Option<usize>,
    ) -> Result<TablePage, EngineError> {
        let rows = &*self.rows;
        let total = rows.len();
        let start = cursor
            .map(|cursor| cursor.offset as usize)
            .unwrap_or(0)
            .min(total);
        let remaining = total - start;
        let take = limit.unwrap_or(remaining).min(remaining);
        let end = start + take;
        Ok(TablePage {
            rows: rows[start..end].to_vec(),
            cursor: TableCursor {
                last_seen: Utc::now(),
                offset: end as u64,
            },
        })
    }

    fn reported_row_count(&self) -> Result<u64, EngineError> {
        Ok(self.rows.len() as u64)
    }
}
