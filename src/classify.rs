//! Row classification into logical source categories.
//!
//! Classification is content-first: a row belongs to every category whose
//! defining fields it resolves. The table-name convention (`marketing`,
//! `venda`, `dados`) is only consulted for rows whose content probes match
//! nothing, so flattened multi-table collections classify the same way as
//! freshly fetched ones.

use crate::constants::classify::{
    TABLE_HINT_ADVERTISING, TABLE_HINT_MASTER, TABLE_HINT_PIPELINE,
};
use crate::data::{Record, SourcedRow};
use crate::fields::probe;
use crate::resolve::resolves;

/// Logical source category of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableRole {
    /// Ad-platform performance rows (spend, leads, impressions...).
    Advertising,
    /// CRM sales-pipeline rows (stage, contact, deal value...).
    Pipeline,
    /// Project-level reference rows (units, VGV, project name).
    Master,
}

impl TableRole {
    /// Infer a role from the soft table naming convention.
    ///
    /// Matches case-insensitive substrings, so `Marketing_12` and
    /// `dados_gerais` both resolve. Returns `None` for unconventional names.
    pub fn from_table_name(name: &str) -> Option<TableRole> {
        let lowered = name.to_lowercase();
        if lowered.contains(TABLE_HINT_ADVERTISING) {
            Some(TableRole::Advertising)
        } else if lowered.contains(TABLE_HINT_PIPELINE) {
            Some(TableRole::Pipeline)
        } else if lowered.contains(TABLE_HINT_MASTER) {
            Some(TableRole::Master)
        } else {
            None
        }
    }
}

/// Independent per-category membership of one row.
///
/// Membership is not exclusive: a row may satisfy several categories or
/// none at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleMatches {
    /// Row resolves an advertising-defining field.
    pub advertising: bool,
    /// Row resolves a pipeline-defining field.
    pub pipeline: bool,
    /// Row resolves a master-data-defining field.
    pub master: bool,
}

impl RoleMatches {
    /// Membership in exactly one category.
    pub fn only(role: TableRole) -> Self {
        let mut matches = Self::default();
        match role {
            TableRole::Advertising => matches.advertising = true,
            TableRole::Pipeline => matches.pipeline = true,
            TableRole::Master => matches.master = true,
        }
        matches
    }

    /// Returns `true` when the row matched no category.
    pub fn is_empty(&self) -> bool {
        !(self.advertising || self.pipeline || self.master)
    }

    /// Returns `true` when the row belongs to `role`.
    pub fn contains(&self, role: TableRole) -> bool {
        match role {
            TableRole::Advertising => self.advertising,
            TableRole::Pipeline => self.pipeline,
            TableRole::Master => self.master,
        }
    }
}

/// Probe a row's content for category-defining fields.
pub fn probe_record(record: &Record) -> RoleMatches {
    RoleMatches {
        advertising: resolves(record, probe::ADVERTISING),
        pipeline: resolves(record, probe::PIPELINE),
        master: resolves(record, probe::MASTER),
    }
}

/// Classify one row: content probe first, table-name hint as the fallback.
pub fn classify_row(row: &SourcedRow) -> RoleMatches {
    let matches = probe_record(&row.record);
    if !matches.is_empty() {
        return matches;
    }
    TableRole::from_table_name(&row.table)
        .map(RoleMatches::only)
        .unwrap_or_default()
}
