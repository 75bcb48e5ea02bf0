//! Row filters for re-aggregating a slice of the advertising data.
//!
//! Filtering happens on raw rows, before aggregation, so every derived
//! metric stays consistent with the visible subset. A row that does not
//! carry a filtered field at all is kept; only a resolvable value outside
//! the selection excludes it.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::classify::TABLE_HINT_ADVERTISING;
use crate::data::{Record, SourcedRow};
use crate::fields::advertising;
use crate::resolve::find_text;

/// Multi-select and date-window constraints applied to rows.
///
/// Empty selections and unset bounds are no-ops.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowFilter {
    /// Campaign names to keep; empty keeps all.
    pub campaigns: Vec<String>,
    /// Ad set names to keep; empty keeps all.
    pub ad_sets: Vec<String>,
    /// Ad names to keep; empty keeps all.
    pub ads: Vec<String>,
    /// Earliest row date to keep, inclusive.
    pub start: Option<NaiveDate>,
    /// Latest row date to keep, inclusive.
    pub end: Option<NaiveDate>,
}

impl RowFilter {
    /// Replaces the campaign selection.
    pub fn with_campaigns<I, S>(mut self, campaigns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.campaigns = campaigns.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the ad set selection.
    pub fn with_ad_sets<I, S>(mut self, ad_sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ad_sets = ad_sets.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the ad selection.
    pub fn with_ads<I, S>(mut self, ads: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ads = ads.into_iter().map(Into::into).collect();
        self
    }

    /// Sets both date bounds at once.
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
            && self.ad_sets.is_empty()
            && self.ads.is_empty()
            && self.start.is_none()
            && self.end.is_none()
    }

    /// Whether a record survives every constraint.
    pub fn matches(&self, record: &Record) -> bool {
        selection_allows(record, &self.campaigns, advertising::CAMPAIGN)
            && selection_allows(record, &self.ad_sets, advertising::AD_SET)
            && selection_allows(record, &self.ads, advertising::AD_NAME)
            && self.date_allows(record)
    }

    /// Keeps the rows whose records survive every constraint.
    pub fn filter_rows(&self, rows: Vec<SourcedRow>) -> Vec<SourcedRow> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter()
            .filter(|row| self.matches(&row.record))
            .collect()
    }

    fn date_allows(&self, record: &Record) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        let raw = match find_text(record, advertising::DATE) {
            Some(raw) => raw,
            None => return true,
        };
        let date = match parse_row_date(&raw) {
            Some(date) => date,
            None => return true,
        };
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

fn selection_allows(record: &Record, selection: &[String], aliases: &[&str]) -> bool {
    if selection.is_empty() {
        return true;
    }
    match find_text(record, aliases) {
        Some(value) => selection.iter().any(|entry| entry == &value),
        None => true,
    }
}

/// Reads a row date as ISO `YYYY-MM-DD` or `DD/MM/YYYY`.
///
/// A trailing time portion after `T` or a space is ignored.
fn parse_row_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%d/%m/%Y"))
        .ok()
}

/// Distinct values available for each filterable dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Campaign names, sorted.
    pub campaigns: Vec<String>,
    /// Ad set names, sorted.
    pub ad_sets: Vec<String>,
    /// Ad names, sorted.
    pub ads: Vec<String>,
}

impl FilterOptions {
    /// Collects the distinct filter values from advertising-named tables.
    pub fn collect(rows: &[SourcedRow]) -> Self {
        let mut campaigns = BTreeSet::new();
        let mut ad_sets = BTreeSet::new();
        let mut ads = BTreeSet::new();
        for row in rows {
            if !row.table.to_lowercase().contains(TABLE_HINT_ADVERTISING) {
                continue;
            }
            if let Some(campaign) = find_text(&row.record, advertising::CAMPAIGN) {
                campaigns.insert(campaign);
            }
            if let Some(ad_set) = find_text(&row.record, advertising::AD_SET) {
                ad_sets.insert(ad_set);
            }
            if let Some(ad) = find_text(&row.record, advertising::AD_NAME) {
                ads.insert(ad);
            }
        }
        Self {
            campaigns: campaigns.into_iter().collect(),
            ad_sets: ad_sets.into_iter().collect(),
            ads: ads.into_iter().collect(),
        }
    }
}
