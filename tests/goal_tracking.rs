use chrono::NaiveDate;
use serde_json::json;

use funnelboard::aggregate::aggregate;
use funnelboard::data::SourcedRow;
use funnelboard::goals::active_days;
use funnelboard::{Goal, GoalSet, GoalStatus};

fn tagged(table: &str, rows: serde_json::Value) -> Vec<SourcedRow> {
    let records: Vec<funnelboard::data::Record> = serde_json::from_value(rows).unwrap();
    SourcedRow::tag_table(table, records)
}

/// Half a month of campaign data with round totals: spend 1200, sixty
/// platform leads, 100k impressions, 1500 clicks, four pipeline leads.
fn campaign_rows() -> Vec<SourcedRow> {
    let mut rows = tagged(
        "Marketing_1",
        json!([
            {
                "Amount Spent": "R$ 800,00",
                "Impressions": 60000,
                "Link Clicks": 900,
                "Frequency": 2.0,
                "leads": 40
            },
            {
                "Amount Spent": 400.0,
                "Impressions": 40000,
                "Link Clicks": 600,
                "Frequency": 4.0,
                "leads": 20
            }
        ]),
    );
    rows.extend(tagged(
        "Vendas_1",
        json!([
            {"nome": "Ana", "etapa": "Entrada do Lead"},
            {"nome": "Bruno", "etapa": "Qualificado"},
            {"nome": "Carla", "etapa": "Proposta Enviada"},
            {"nome": "Diego", "etapa": "Vendas Concluídas", "valor": 50000}
        ]),
    ));
    rows
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn goals_rate_an_aggregated_fortnight() {
    let snapshot = aggregate(&campaign_rows());
    let days = active_days(date(2024, 6, 1), date(2024, 6, 15));
    assert_eq!(days, 15.0);

    let goals = GoalSet {
        amount_spent: Goal::monthly(3000.0),
        leads: Goal::monthly(6.0),
        cpl: Goal::fixed(25.0),
        ctr: Goal::fixed(1.5),
        cpm: Goal::fixed(10.0),
        frequency: Goal::fixed(0.0),
    };
    let outcomes = goals.assess(&snapshot.metrics, days);

    // Monthly 3000 over half a month is 1500; spending 1200 beats it.
    assert_eq!(outcomes.amount_spent.target, 1500.0);
    assert_eq!(outcomes.amount_spent.actual, 1200.0);
    assert_eq!(outcomes.amount_spent.status, Some(GoalStatus::Good));

    // The lead goal rates built pipeline leads, not the platform column.
    assert_eq!(outcomes.leads.target, 3.0);
    assert_eq!(outcomes.leads.actual, 4.0);
    assert_eq!(outcomes.leads.status, Some(GoalStatus::Good));

    // CPL uses the platform lead count: 1200 / 60 = 20, under the 25 target.
    assert_eq!(outcomes.cpl.actual, 20.0);
    assert_eq!(outcomes.cpl.status, Some(GoalStatus::Good));

    // CTR lands on its own target, inside the tolerance band.
    assert_eq!(outcomes.ctr.status, Some(GoalStatus::Average));

    // CPM of 12 against a target of 10 overshoots a lower-is-better goal.
    assert_eq!(outcomes.cpm.status, Some(GoalStatus::Bad));

    // No frequency target was set, so the reading stays unrated.
    assert_eq!(outcomes.frequency.actual, 3.0);
    assert_eq!(outcomes.frequency.status, None);
}

#[test]
fn window_endpoint_order_never_changes_the_ratings() {
    let snapshot = aggregate(&campaign_rows());
    let goals = GoalSet {
        amount_spent: Goal::monthly(3000.0),
        ..GoalSet::default()
    };
    let forward = goals.assess(
        &snapshot.metrics,
        active_days(date(2024, 6, 1), date(2024, 6, 15)),
    );
    let backward = goals.assess(
        &snapshot.metrics,
        active_days(date(2024, 6, 15), date(2024, 6, 1)),
    );
    assert_eq!(forward, backward);
}

#[test]
fn single_day_window_scales_daily_goals_to_one_day() {
    let snapshot = aggregate(&campaign_rows());
    let goals = GoalSet {
        amount_spent: Goal::daily(1200.0),
        ..GoalSet::default()
    };
    let day = date(2024, 6, 1);
    let outcomes = goals.assess(&snapshot.metrics, active_days(day, day));
    assert_eq!(outcomes.amount_spent.target, 1200.0);
    // Exactly on target is average, not good.
    assert_eq!(outcomes.amount_spent.status, Some(GoalStatus::Average));
}

#[test]
fn status_labels_surface_in_portuguese() {
    let snapshot = aggregate(&campaign_rows());
    let goals = GoalSet {
        amount_spent: Goal::fixed(2000.0),
        cpm: Goal::fixed(10.0),
        ctr: Goal::fixed(1.5),
        ..GoalSet::default()
    };
    let outcomes = goals.assess(&snapshot.metrics, 15.0);

    let label = |status: Option<GoalStatus>| status.map(|status| status.to_string());
    assert_eq!(label(outcomes.amount_spent.status), Some("BOM".to_string()));
    assert_eq!(label(outcomes.ctr.status), Some("MÉDIA".to_string()));
    assert_eq!(label(outcomes.cpm.status), Some("RUIM".to_string()));
    assert_eq!(label(outcomes.leads.status), None);
}

#[test]
fn partial_goal_settings_fill_in_with_defaults() {
    let parsed: GoalSet = serde_json::from_str(
        r#"{"leads": {"value": 300.0, "mode": "monthly"}, "cpl": {"value": 25.0, "mode": "fixed"}}"#,
    )
    .unwrap();

    assert_eq!(parsed.leads, Goal::monthly(300.0));
    assert_eq!(parsed.cpl, Goal::fixed(25.0));
    // Unspecified goals take the defaults: monthly pacing for spend and
    // leads, fixed for the rate metrics.
    assert_eq!(parsed.amount_spent, Goal::monthly(0.0));
    assert_eq!(parsed.ctr, Goal::fixed(0.0));

    let json = serde_json::to_string(&parsed).unwrap();
    let back: GoalSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, parsed);
}
