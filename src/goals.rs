//! Goal targets, window scaling, and three-level performance rating.
//!
//! A goal is a raw value plus a mode describing what the value spans.
//! Before comparison the value is scaled to the active reporting window,
//! then the achieved metric is rated against it with a tolerance band so
//! near-misses read as average rather than bad.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::goals::{DAYS_PER_MONTH, STATUS_BUFFER};
use crate::metrics::Metrics;

/// What a goal's raw value spans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalMode {
    /// The value is a per-day target.
    Daily,
    /// The value is a per-30-day target.
    Monthly,
    /// The value applies to the window as-is.
    #[default]
    Fixed,
}

/// A single metric target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Raw target value, interpreted through `mode`.
    pub value: f64,
    /// Scaling mode for the value.
    pub mode: GoalMode,
}

impl Goal {
    /// Builds a goal with an explicit mode.
    pub fn new(value: f64, mode: GoalMode) -> Self {
        Self { value, mode }
    }

    /// A goal applied to the window unchanged.
    pub fn fixed(value: f64) -> Self {
        Self::new(value, GoalMode::Fixed)
    }

    /// A goal stated per 30-day month.
    pub fn monthly(value: f64) -> Self {
        Self::new(value, GoalMode::Monthly)
    }

    /// A goal stated per day.
    pub fn daily(value: f64) -> Self {
        Self::new(value, GoalMode::Daily)
    }

    /// Scales the raw value to a window of `active_days` days.
    pub fn scaled_target(&self, active_days: f64) -> f64 {
        match self.mode {
            GoalMode::Daily => self.value * active_days,
            GoalMode::Monthly => self.value * (active_days / DAYS_PER_MONTH),
            GoalMode::Fixed => self.value,
        }
    }
}

/// Number of days a reporting window covers, endpoints inclusive.
///
/// The order of the endpoints does not matter; a window from a date to
/// itself counts as one day.
pub fn active_days(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days().abs() as f64 + 1.0
}

/// Direction in which a metric improves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Larger readings are better (leads, CTR).
    HigherBetter,
    /// Smaller readings are better (spend, CPL, CPM, frequency).
    LowerBetter,
}

/// Three-level rating of an achieved value against its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    /// Beyond the target by more than the tolerance band.
    #[serde(rename = "BOM")]
    Good,
    /// Within the tolerance band around the target.
    #[serde(rename = "MÉDIA")]
    Average,
    /// Behind the target by more than the tolerance band.
    #[serde(rename = "RUIM")]
    Bad,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalStatus::Good => "BOM",
            GoalStatus::Average => "MÉDIA",
            GoalStatus::Bad => "RUIM",
        };
        f.write_str(label)
    }
}

/// Rates `actual` against `target` with a symmetric tolerance band.
///
/// An unset target rates as `None` rather than any status. Ratios landing
/// exactly on a band edge stay average.
pub fn classify_status(actual: f64, target: f64, polarity: Polarity) -> Option<GoalStatus> {
    if target == 0.0 {
        return None;
    }
    let ratio = actual / target;
    let status = match polarity {
        Polarity::HigherBetter => {
            if ratio > 1.0 + STATUS_BUFFER {
                GoalStatus::Good
            } else if ratio < 1.0 - STATUS_BUFFER {
                GoalStatus::Bad
            } else {
                GoalStatus::Average
            }
        }
        Polarity::LowerBetter => {
            if ratio < 1.0 - STATUS_BUFFER {
                GoalStatus::Good
            } else if ratio > 1.0 + STATUS_BUFFER {
                GoalStatus::Bad
            } else {
                GoalStatus::Average
            }
        }
    };
    Some(status)
}

/// One target per tracked metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalSet {
    /// Target for total spend.
    pub amount_spent: Goal,
    /// Target for the lead count.
    pub leads: Goal,
    /// Target for cost per lead.
    pub cpl: Goal,
    /// Target for click-through rate.
    pub ctr: Goal,
    /// Target for cost per thousand impressions.
    pub cpm: Goal,
    /// Target for average exposure frequency.
    pub frequency: Goal,
}

impl Default for GoalSet {
    fn default() -> Self {
        Self {
            amount_spent: Goal::monthly(0.0),
            leads: Goal::monthly(0.0),
            cpl: Goal::fixed(0.0),
            ctr: Goal::fixed(0.0),
            cpm: Goal::fixed(0.0),
            frequency: Goal::fixed(0.0),
        }
    }
}

/// A scaled target next to the achieved value and its rating.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalAssessment {
    /// Target after window scaling.
    pub target: f64,
    /// Achieved value from the snapshot metrics.
    pub actual: f64,
    /// Rating, absent when no target is set.
    pub status: Option<GoalStatus>,
}

/// Ratings for every tracked metric over one reporting window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalOutcomes {
    /// Spend rating; lower spend than target is good.
    pub amount_spent: GoalAssessment,
    /// Lead-count rating; more leads than target is good.
    pub leads: GoalAssessment,
    /// Cost-per-lead rating; cheaper leads are good.
    pub cpl: GoalAssessment,
    /// Click-through-rate rating; higher is good.
    pub ctr: GoalAssessment,
    /// Cost-per-mille rating; cheaper impressions are good.
    pub cpm: GoalAssessment,
    /// Frequency rating; lower exposure repetition is good.
    pub frequency: GoalAssessment,
}

impl GoalSet {
    /// Scales every goal to the window and rates the achieved metrics.
    pub fn assess(&self, metrics: &Metrics, active_days: f64) -> GoalOutcomes {
        GoalOutcomes {
            amount_spent: assess_one(
                self.amount_spent,
                metrics.total_spend,
                active_days,
                Polarity::LowerBetter,
            ),
            leads: assess_one(
                self.leads,
                metrics.total_leads as f64,
                active_days,
                Polarity::HigherBetter,
            ),
            cpl: assess_one(self.cpl, metrics.cpl, active_days, Polarity::LowerBetter),
            ctr: assess_one(self.ctr, metrics.ctr, active_days, Polarity::HigherBetter),
            cpm: assess_one(self.cpm, metrics.cpm, active_days, Polarity::LowerBetter),
            frequency: assess_one(
                self.frequency,
                metrics.frequency,
                active_days,
                Polarity::LowerBetter,
            ),
        }
    }
}

fn assess_one(goal: Goal, actual: f64, active_days: f64, polarity: Polarity) -> GoalAssessment {
    let target = goal.scaled_target(active_days);
    GoalAssessment {
        target,
        actual,
        status: classify_status(actual, target, polarity),
    }
}
