#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// The multi-source fold from classified rows to a dashboard snapshot.
pub mod aggregate;
/// Row classification by content probes and table-name hints.
pub mod classify;
/// Engine configuration types.
pub mod config;
/// Centralized constants used across classification, funnel, and goals.
pub mod constants;
/// Row, record, and snapshot types.
pub mod data;
/// Engine façade tying table acquisition to aggregation.
pub mod engine;
/// Canonical alias tables for every resolvable field.
pub mod fields;
/// Row filters and filter option collection.
pub mod filter;
/// Canonical funnel stages, stage matching, and colors.
pub mod funnel;
/// Goal targets, window scaling, and status rating.
pub mod goals;
mod hash;
/// Concurrent table acquisition infrastructure.
pub mod ingestion;
/// Aggregate metric helpers.
pub mod metrics;
/// Locale-tolerant numeric parsing.
pub mod numeric;
/// Fuzzy field resolution over normalized keys.
pub mod resolve;
/// Table source traits and built-in tables.
pub mod source;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::EngineConfig;
pub use data::{
    CreativeRetention, DashboardSnapshot, DashboardUpdate, FieldValue, FunnelStage, Lead,
    ProjectSummary, Record, SourcedRow,
};
pub use engine::{DashboardEngine, RowFetch};
pub use errors::EngineError;
pub use filter::{FilterOptions, RowFilter};
pub use goals::{Goal, GoalAssessment, GoalMode, GoalOutcomes, GoalSet, GoalStatus, Polarity};
pub use ingestion::{FetchOutcome, IngestionManager, TableFetchStats};
pub use metrics::Metrics;
pub use source::{InMemoryTable, TableCursor, TablePage, TableSource};
pub use types::{
    AdName, ColorValue, FieldName, LeadId, NormalizedKey, RawDate, StageName, TableName,
};
