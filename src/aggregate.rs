//! The multi-source fold: classified rows in, one dashboard snapshot out.
//!
//! Every pass rebuilds its accumulators from scratch and returns an owned
//! snapshot; nothing is shared across invocations and no input row escapes
//! by reference. Malformed fields degrade to defaults, so the fold itself
//! cannot fail.

use indexmap::IndexMap;
use tracing::debug;

use crate::classify::classify_row;
use crate::constants::aggregate::LEAD_ID_SEED;
use crate::constants::defaults::{
    DEFAULT_PIPELINE, FREQUENCY_FALLBACK, PLACEHOLDER, UNNAMED_AD, UNNAMED_PROJECT,
};
use crate::constants::funnel::{SALE_STAGE_ID, STAGE_COUNT};
use crate::data::{CreativeRetention, DashboardSnapshot, Lead, ProjectSummary, Record, SourcedRow};
use crate::fields::{advertising, master, pipeline, video};
use crate::funnel::{self, SALE_STAGE_INDEX};
use crate::hash::lead_fingerprint;
use crate::metrics::{
    average_or, click_through_rate, cost_per_mille, leads_for_calculation, ratio_or_zero, Metrics,
};
use crate::resolve::{find_number, find_text, normalize_key};
use crate::types::{AdName, RawDate};

/// Running totals over advertising rows.
#[derive(Default)]
struct AdTotals {
    spend: f64,
    platform_leads: f64,
    reach: f64,
    impressions: f64,
    clicks: f64,
    // A zero frequency reading is indistinguishable from an absent column
    // after parsing; both stay out of the average.
    frequency_sum: f64,
    frequency_rows: u64,
}

/// Per-creative milestone sums before retention is derived.
#[derive(Default)]
struct CreativeTotals {
    views_3s: f64,
    p25: f64,
    p50: f64,
    p75: f64,
    p95: f64,
    p100: f64,
    date: Option<RawDate>,
}

/// Running state over pipeline rows.
struct PipelineFold {
    revenue: f64,
    completed_sales: u64,
    stage_counts: [u64; STAGE_COUNT],
    leads: Vec<Lead>,
}

/// First-nonzero-wins master data fill, scanned in reverse input order.
#[derive(Default)]
struct MasterFill {
    total_units: f64,
    vgv: f64,
    project_name: Option<String>,
}

/// Fold a row collection into a complete dashboard snapshot.
///
/// Rows are classified independently per category (content probe first,
/// table-name hint as fallback), so the same collection can be aggregated
/// whether it was freshly fetched per table or flattened by a filter.
pub fn aggregate(rows: &[SourcedRow]) -> DashboardSnapshot {
    let mut advertising_rows = Vec::new();
    let mut pipeline_rows = Vec::new();
    let mut master_rows = Vec::new();
    for row in rows {
        let matches = classify_row(row);
        if matches.advertising {
            advertising_rows.push(row);
        }
        if matches.pipeline {
            pipeline_rows.push(row);
        }
        if matches.master {
            master_rows.push(row);
        }
    }

    let fill = fill_master_data(&master_rows, rows);
    let (ads, creatives) = fold_advertising(&advertising_rows);
    let sales = fold_pipeline(&pipeline_rows);

    debug!(
        rows = rows.len(),
        advertising = advertising_rows.len(),
        pipeline = pipeline_rows.len(),
        master = master_rows.len(),
        leads = sales.leads.len(),
        "aggregation pass completed"
    );

    let cpl_denominator = leads_for_calculation(ads.platform_leads, sales.leads.len() as u64);
    let metrics = Metrics {
        total_spend: ads.spend,
        platform_leads: ads.platform_leads,
        total_leads: sales.leads.len() as u64,
        total_revenue: sales.revenue,
        completed_sales: sales.completed_sales,
        reach: ads.reach,
        impressions: ads.impressions,
        clicks: ads.clicks,
        cpl: ratio_or_zero(ads.spend, cpl_denominator),
        cpc: ratio_or_zero(ads.spend, ads.clicks),
        ctr: click_through_rate(ads.clicks, ads.impressions),
        cpm: cost_per_mille(ads.spend, ads.impressions),
        frequency: average_or(ads.frequency_sum, ads.frequency_rows, FREQUENCY_FALLBACK),
    };

    DashboardSnapshot {
        metrics,
        project: ProjectSummary {
            name: fill
                .project_name
                .unwrap_or_else(|| UNNAMED_PROJECT.to_string()),
            total_units: fill.total_units,
            vgv: fill.vgv,
            revenue_per_unit: ratio_or_zero(fill.vgv, fill.total_units),
        },
        funnel: funnel::build_funnel(&sales.stage_counts),
        leads: sales.leads,
        creatives,
    }
}

/// Scan master rows backwards, filling each field independently.
///
/// When no row probed as master the whole collection is scanned instead.
/// Later-indexed rows win, but a field left empty by them can still be
/// supplied by an earlier row.
fn fill_master_data(master_rows: &[&SourcedRow], all_rows: &[SourcedRow]) -> MasterFill {
    let mut fill = MasterFill::default();
    let mut scan_backwards = |record: &Record| {
        if fill.total_units == 0.0 {
            let units = find_number(record, master::UNITS);
            if units > 0.0 {
                fill.total_units = units;
            }
        }
        if fill.vgv == 0.0 {
            let vgv = find_number(record, master::VGV);
            if vgv > 0.0 {
                fill.vgv = vgv;
            }
        }
        if fill.project_name.is_none() {
            if let Some(name) = find_text(record, master::PROJECT_NAME) {
                fill.project_name = Some(name);
            }
        }
    };
    if master_rows.is_empty() {
        for row in all_rows.iter().rev() {
            scan_backwards(&row.record);
        }
    } else {
        for row in master_rows.iter().rev() {
            scan_backwards(&row.record);
        }
    }
    fill
}

/// Fold advertising rows into totals plus sorted creative roll-ups.
fn fold_advertising(rows: &[&SourcedRow]) -> (AdTotals, Vec<CreativeRetention>) {
    let mut totals = AdTotals::default();
    let mut creatives: IndexMap<AdName, CreativeTotals> = IndexMap::new();

    for row in rows {
        let record = &row.record;
        totals.spend += find_number(record, advertising::SPEND);
        totals.platform_leads += find_number(record, advertising::LEADS);
        totals.reach += find_number(record, advertising::REACH);
        totals.impressions += find_number(record, advertising::IMPRESSIONS);
        totals.clicks += find_number(record, advertising::CLICKS);

        let frequency = find_number(record, advertising::FREQUENCY);
        if frequency > 0.0 {
            totals.frequency_sum += frequency;
            totals.frequency_rows += 1;
        }

        let ad_name =
            find_text(record, advertising::AD_NAME).unwrap_or_else(|| UNNAMED_AD.to_string());
        let entry = creatives.entry(ad_name).or_insert_with(|| CreativeTotals {
            date: find_text(record, advertising::DATE),
            ..CreativeTotals::default()
        });
        entry.views_3s += find_number(record, video::VIEWS_3S);
        entry.p25 += find_number(record, video::P25);
        entry.p50 += find_number(record, video::P50);
        entry.p75 += find_number(record, video::P75);
        entry.p95 += find_number(record, video::P95);
        entry.p100 += find_number(record, video::P100);
    }

    let mut playback: Vec<CreativeRetention> = creatives
        .into_iter()
        .map(|(ad_name, sums)| CreativeRetention {
            ad_name,
            views_3s: sums.views_3s,
            p25: sums.p25,
            p50: sums.p50,
            p75: sums.p75,
            p95: sums.p95,
            p100: sums.p100,
            retention_rate: ratio_or_zero(sums.p100, sums.views_3s),
            date: sums.date,
        })
        .collect();
    playback.sort_by(|a, b| {
        b.p100
            .total_cmp(&a.p100)
            .then(b.views_3s.total_cmp(&a.views_3s))
    });

    (totals, playback)
}

/// Fold pipeline rows into revenue, funnel counts, and the lead list.
fn fold_pipeline(rows: &[&SourcedRow]) -> PipelineFold {
    let mut fold = PipelineFold {
        revenue: 0.0,
        completed_sales: 0,
        stage_counts: [0; STAGE_COUNT],
        leads: Vec::new(),
    };

    for row in rows {
        let record = &row.record;
        let stage_name = find_text(record, pipeline::STAGE_NAME)
            .map(|name| name.trim().to_string())
            .unwrap_or_default();
        let stage_id = find_text(record, pipeline::STAGE_ID)
            .map(|id| id.trim().to_string())
            .unwrap_or_default();
        let normalized_stage = normalize_key(&stage_name);

        let completed_sale =
            stage_id == SALE_STAGE_ID || funnel::is_completed_sale(&normalized_stage);
        if completed_sale {
            let value = find_number(record, pipeline::SALE_VALUE);
            let quantity = find_number(record, pipeline::QUANTITY);
            let multiplier = if quantity > 0.0 { quantity } else { 1.0 };
            fold.revenue += value * multiplier;
            fold.completed_sales += 1;
            fold.stage_counts[SALE_STAGE_INDEX] += 1;
        } else if !stage_name.is_empty() {
            if let Some(index) = funnel::canonical_index(&normalized_stage) {
                fold.stage_counts[index] += 1;
            }
        }

        if let Some(name) = find_text(record, pipeline::LEAD_NAME) {
            let fingerprint =
                lead_fingerprint(LEAD_ID_SEED, &row.table, row.index, &name, &stage_name);
            fold.leads.push(Lead {
                id: format!("lead-{}-{:016x}", row.index, fingerprint),
                name,
                email: find_text(record, pipeline::EMAIL)
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                phone: find_text(record, pipeline::PHONE)
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                business_title: PLACEHOLDER.to_string(),
                pipeline: DEFAULT_PIPELINE.to_string(),
                stage: stage_name.clone(),
                date: find_text(record, pipeline::DATE)
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            });
        }
    }

    fold
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(table: &str, index: usize, fields: serde_json::Value) -> SourcedRow {
        SourcedRow::new(table, index, serde_json::from_value(fields).unwrap())
    }

    #[test]
    fn master_scan_prefers_later_rows_per_field_independently() {
        let rows = vec![
            row("Dados", 0, json!({"unidades": 120, "VGV": "50.000.000"})),
            row("Dados", 1, json!({"unidades": 0, "projeto": "Residencial Vista"})),
        ];
        let snapshot = aggregate(&rows);
        // Row 1 supplies the name, row 0 still supplies units and VGV.
        assert_eq!(snapshot.project.name, "Residencial Vista");
        assert_eq!(snapshot.project.total_units, 120.0);
        assert_eq!(snapshot.project.vgv, 50_000_000.0);
        assert_eq!(snapshot.project.revenue_per_unit, 50_000_000.0 / 120.0);
    }

    #[test]
    fn master_scan_falls_back_to_all_rows_without_master_probes() {
        let rows = vec![row(
            "misc",
            0,
            json!({"projeto": "Loteamento Sul", "observacao": "x"}),
        )];
        let snapshot = aggregate(&rows);
        assert_eq!(snapshot.project.name, "Loteamento Sul");
        assert_eq!(snapshot.project.total_units, 0.0);
    }

    #[test]
    fn frequency_average_ignores_zero_readings() {
        let rows = vec![
            row("Marketing_1", 0, json!({"Amount Spent": 10, "Frequency": "2,0"})),
            row("Marketing_1", 1, json!({"Amount Spent": 10, "Frequency": 4})),
            row("Marketing_1", 2, json!({"Amount Spent": 10, "Frequency": 0})),
        ];
        let snapshot = aggregate(&rows);
        assert_eq!(snapshot.metrics.frequency, 3.0);
    }

    #[test]
    fn frequency_defaults_to_one_without_readings() {
        let rows = vec![row("Marketing_1", 0, json!({"Amount Spent": 10}))];
        let snapshot = aggregate(&rows);
        assert_eq!(snapshot.metrics.frequency, 1.0);
    }

    #[test]
    fn creatives_group_by_ad_name_and_sort_by_completions() {
        let rows = vec![
            row(
                "Marketing_1",
                0,
                json!({
                    "Amount Spent": 5,
                    "Ad Name": "Video A",
                    "3-second video plays": 100,
                    "Video plays at 100%": 10
                }),
            ),
            row(
                "Marketing_1",
                1,
                json!({
                    "Amount Spent": 5,
                    "Ad Name": "Video A",
                    "3-second video plays": 100,
                    "Video plays at 100%": 15
                }),
            ),
            row(
                "Marketing_1",
                2,
                json!({
                    "Amount Spent": 5,
                    "Ad Name": "Video B",
                    "3-second video plays": 500,
                    "Video plays at 100%": 40
                }),
            ),
            row("Marketing_1", 3, json!({"Amount Spent": 5})),
        ];
        let snapshot = aggregate(&rows);
        let creatives = &snapshot.creatives;
        assert_eq!(creatives.len(), 3);
        assert_eq!(creatives[0].ad_name, "Video B");
        assert_eq!(creatives[0].p100, 40.0);
        assert_eq!(creatives[0].retention_rate, 40.0 / 500.0);
        assert_eq!(creatives[1].ad_name, "Video A");
        assert_eq!(creatives[1].views_3s, 200.0);
        assert_eq!(creatives[1].p100, 25.0);
        assert_eq!(creatives[2].ad_name, "Sem Nome");
        assert_eq!(creatives[2].retention_rate, 0.0);
    }

    #[test]
    fn creative_sort_ties_break_on_three_second_views() {
        let rows = vec![
            row(
                "Marketing_1",
                0,
                json!({"Amount Spent": 1, "Ad Name": "A", "Video plays at 100%": 10, "3-second video plays": 50}),
            ),
            row(
                "Marketing_1",
                1,
                json!({"Amount Spent": 1, "Ad Name": "B", "Video plays at 100%": 10, "3-second video plays": 90}),
            ),
        ];
        let snapshot = aggregate(&rows);
        assert_eq!(snapshot.creatives[0].ad_name, "B");
        assert_eq!(snapshot.creatives[1].ad_name, "A");
    }

    #[test]
    fn lead_ids_are_deterministic_and_distinct() {
        let rows = vec![
            row("Vendas_1", 0, json!({"nome": "Ana", "etapa": "Qualificado"})),
            row("Vendas_1", 1, json!({"nome": "Bruno", "etapa": "Qualificado"})),
        ];
        let first = aggregate(&rows);
        let second = aggregate(&rows);
        assert_eq!(first.leads[0].id, second.leads[0].id);
        assert_eq!(first.leads[1].id, second.leads[1].id);
        assert_ne!(first.leads[0].id, first.leads[1].id);
        assert!(first.leads[0].id.starts_with("lead-0-"));
    }

    #[test]
    fn completed_sale_by_name_multiplies_value_by_quantity() {
        let rows = vec![row(
            "Vendas_1",
            0,
            json!({
                "Nome Etapa": "Vendas Concluídas",
                "valor": "R$ 250.000,00",
                "quantidade": 2,
                "nome": "Carla"
            }),
        )];
        let snapshot = aggregate(&rows);
        assert_eq!(snapshot.metrics.total_revenue, 500_000.0);
        assert_eq!(snapshot.metrics.completed_sales, 1);
        assert_eq!(snapshot.funnel[SALE_STAGE_INDEX].count, 1);
        // The completed-sale row still produces a lead entry.
        assert_eq!(snapshot.leads.len(), 1);
        assert_eq!(snapshot.leads[0].stage, "Vendas Concluídas");
        assert_eq!(snapshot.leads[0].pipeline, "Padrão");
        assert_eq!(snapshot.leads[0].email, "---");
    }

    #[test]
    fn empty_input_yields_a_zeroed_snapshot() {
        let snapshot = aggregate(&[]);
        assert_eq!(snapshot.metrics.total_spend, 0.0);
        assert_eq!(snapshot.metrics.total_leads, 0);
        assert_eq!(snapshot.metrics.cpl, 0.0);
        assert_eq!(snapshot.metrics.frequency, 1.0);
        assert_eq!(snapshot.funnel.len(), 11);
        assert!(snapshot.funnel.iter().all(|stage| stage.count == 0));
        assert_eq!(snapshot.project.name, "Sem Projeto");
        assert!(snapshot.leads.is_empty());
        assert!(snapshot.creatives.is_empty());
    }
}
