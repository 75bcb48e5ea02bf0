use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;

pub use crate::types::{AdName, ColorValue, FieldName, LeadId, RawDate, StageName, TableName};

/// Scalar value held by one record field.
///
/// Untagged so arbitrary JSON table rows deserialize directly: `null`,
/// numbers, booleans, and strings map onto the matching variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit null (treated the same as an absent field).
    Null,
    /// Boolean flag column.
    Bool(bool),
    /// Numeric column already typed by the store.
    Number(f64),
    /// Free-form text column (may still hold a formatted number).
    Text(String),
}

impl FieldValue {
    /// Returns `true` for values the resolver must skip: null and empty text.
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Borrow the inner text when this value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Render the value the way it would appear in a cell.
    ///
    /// Whole-number floats render without a fractional part, so a stored
    /// `100.0` compares equal to the text `"100"` in filters.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(value) => value.to_string(),
            FieldValue::Number(value) => value.to_string(),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// One table row: an insertion-ordered map of raw column names to scalars.
///
/// No schema is enforced; any field may be absent, null, or differently
/// named across rows. Column lookup goes through the fuzzy resolver.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<FieldName, FieldValue>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any existing value under the same raw name.
    pub fn insert(&mut self, name: impl Into<FieldName>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field by its exact raw name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Iterate raw column names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields present (including explicit nulls).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the record holds no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(FieldName, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (FieldName, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A record plus its provenance: which table it came from and at which index.
///
/// Provenance keeps lead ids deterministic and lets table-name hints survive
/// after rows from several tables are flattened into one collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourcedRow {
    /// Table the row was fetched from.
    pub table: TableName,
    /// Zero-based position of the row within its table's fetch order.
    pub index: usize,
    /// The row itself.
    pub record: Record,
}

impl SourcedRow {
    /// Attach provenance to a single record.
    pub fn new(table: impl Into<TableName>, index: usize, record: Record) -> Self {
        Self {
            table: table.into(),
            index,
            record,
        }
    }

    /// Tag a table's fetched rows with their provenance in fetch order.
    pub fn tag_table(table: impl Into<TableName>, rows: Vec<Record>) -> Vec<SourcedRow> {
        let table = table.into();
        rows.into_iter()
            .enumerate()
            .map(|(index, record)| SourcedRow {
                table: table.clone(),
                index,
                record,
            })
            .collect()
    }
}

/// One funnel stage with its matched row count and display color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    /// Canonical stage display name (first letter uppercased).
    pub stage: StageName,
    /// Number of pipeline rows matched to this stage.
    pub count: u64,
    /// CSS color assigned by stage position.
    pub color: ColorValue,
}

/// One CRM contact extracted from a pipeline row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Deterministic id derived from the row's provenance and content.
    pub id: LeadId,
    /// Contact name (required; rows without one produce no lead).
    pub name: String,
    /// Contact e-mail, `"---"` when unresolved.
    pub email: String,
    /// Contact phone, `"---"` when unresolved.
    pub phone: String,
    /// Business title placeholder (not present in any known source).
    pub business_title: String,
    /// Pipeline label, always the default pipeline today.
    pub pipeline: String,
    /// Raw trimmed stage name from the row.
    pub stage: StageName,
    /// Raw date value from the row, `"---"` when unresolved.
    pub date: RawDate,
}

/// Per-creative video playback roll-up keyed by ad name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreativeRetention {
    /// Ad name the rows were grouped under.
    pub ad_name: AdName,
    /// Summed 3-second video plays.
    pub views_3s: f64,
    /// Summed plays reaching 25% of the video.
    pub p25: f64,
    /// Summed plays reaching 50%.
    pub p50: f64,
    /// Summed plays reaching 75%.
    pub p75: f64,
    /// Summed plays reaching 95%.
    pub p95: f64,
    /// Summed plays reaching 100%.
    pub p100: f64,
    /// `p100 / views_3s`, zero when there were no 3-second views.
    pub retention_rate: f64,
    /// Date value of the first row seen for this creative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<RawDate>,
}

/// Project-level reference values from master rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project display name.
    pub name: String,
    /// Total inventory units.
    pub total_units: f64,
    /// Total potential sale value (VGV).
    pub vgv: f64,
    /// VGV per managed unit, zero when units is zero.
    pub revenue_per_unit: f64,
}

/// Complete aggregation output handed to presentation.
///
/// A plain serializable value: no references into acquisition state, safe to
/// cache, diff, or transmit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Derived KPI values.
    pub metrics: Metrics,
    /// Project master data summary.
    pub project: ProjectSummary,
    /// All eleven canonical funnel stages in fixed order.
    pub funnel: Vec<FunnelStage>,
    /// Flattened lead list built from pipeline rows.
    pub leads: Vec<Lead>,
    /// Creative roll-ups sorted by completion count.
    pub creatives: Vec<CreativeRetention>,
}

/// Result of one engine refresh: best-effort snapshot plus fetch telemetry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardUpdate {
    /// Snapshot aggregated from every table that fetched successfully.
    pub snapshot: DashboardSnapshot,
    /// Names of tables whose fetch succeeded, in registration order.
    pub fetched_tables: Vec<TableName>,
    /// Joined per-table failure summaries; `None` when every table succeeded.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_deserialize_untagged_from_json_rows() {
        let record: Record = serde_json::from_value(serde_json::json!({
            "Amount Spent": "R$ 1.234,56",
            "Impressions": 1000,
            "active": true,
            "notes": null
        }))
        .unwrap();

        assert_eq!(
            record.get("Amount Spent"),
            Some(&FieldValue::Text("R$ 1.234,56".into()))
        );
        assert_eq!(record.get("Impressions"), Some(&FieldValue::Number(1000.0)));
        assert_eq!(record.get("active"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get("notes"), Some(&FieldValue::Null));
    }

    #[test]
    fn missing_detection_covers_null_and_empty_text() {
        assert!(FieldValue::Null.is_missing());
        assert!(FieldValue::Text(String::new()).is_missing());
        assert!(!FieldValue::Text("0".into()).is_missing());
        assert!(!FieldValue::Number(0.0).is_missing());
        assert!(!FieldValue::Bool(false).is_missing());
    }

    #[test]
    fn display_renders_whole_floats_without_fraction() {
        assert_eq!(FieldValue::Number(100.0).display(), "100");
        assert_eq!(FieldValue::Number(100.5).display(), "100.5");
        assert_eq!(FieldValue::Text("Campanha A".into()).display(), "Campanha A");
        assert_eq!(FieldValue::Null.display(), "");
    }

    #[test]
    fn tag_table_numbers_rows_in_fetch_order() {
        let mut first = Record::new();
        first.insert("nome", "Ana");
        let mut second = Record::new();
        second.insert("nome", "Bruno");

        let tagged = SourcedRow::tag_table("Vendas_1", vec![first, second]);
        assert_eq!(tagged.len(), 2);
        assert_eq!(tagged[0].index, 0);
        assert_eq!(tagged[1].index, 1);
        assert!(tagged.iter().all(|row| row.table == "Vendas_1"));
    }
}
