use serde::{Deserialize, Serialize};

/// Derived KPI values for one aggregation pass.
///
/// Every cost-per-X value is `spend / count` with a zero denominator
/// yielding zero, never NaN or infinity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Summed advertising spend.
    pub total_spend: f64,
    /// Lead count reported by the ad platform.
    pub platform_leads: f64,
    /// Number of lead entries built from pipeline rows.
    pub total_leads: u64,
    /// Summed revenue from completed sales.
    pub total_revenue: f64,
    /// Number of completed-sale pipeline rows.
    pub completed_sales: u64,
    /// Summed audience reach.
    pub reach: f64,
    /// Summed impressions.
    pub impressions: f64,
    /// Summed link clicks.
    pub clicks: f64,
    /// Cost per lead.
    pub cpl: f64,
    /// Cost per click.
    pub cpc: f64,
    /// Click-through rate, in percent.
    pub ctr: f64,
    /// Cost per thousand impressions.
    pub cpm: f64,
    /// Average exposure frequency over rows with a nonzero reading.
    pub frequency: f64,
}

/// Divide, yielding zero whenever the denominator is not positive.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Click-through rate in percent.
pub fn click_through_rate(clicks: f64, impressions: f64) -> f64 {
    ratio_or_zero(clicks, impressions) * 100.0
}

/// Cost per thousand impressions.
pub fn cost_per_mille(spend: f64, impressions: f64) -> f64 {
    ratio_or_zero(spend, impressions) * 1000.0
}

/// Average of `sum` over `count` readings, or `fallback` when none were seen.
pub fn average_or(sum: f64, count: u64, fallback: f64) -> f64 {
    if count > 0 {
        sum / count as f64
    } else {
        fallback
    }
}

/// Denominator for CPL: platform-reported leads when available, else the
/// count of lead entries built from pipeline rows.
pub fn leads_for_calculation(platform_leads: f64, built_leads: u64) -> f64 {
    if platform_leads > 0.0 {
        platform_leads
    } else {
        built_leads as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominators_never_produce_nan_or_infinity() {
        assert_eq!(ratio_or_zero(100.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(100.0, -5.0), 0.0);
        assert_eq!(click_through_rate(50.0, 0.0), 0.0);
        assert_eq!(cost_per_mille(100.0, 0.0), 0.0);
    }

    #[test]
    fn rates_scale_by_their_units() {
        assert_eq!(click_through_rate(50.0, 1000.0), 5.0);
        assert_eq!(cost_per_mille(100.0, 1000.0), 100.0);
        assert_eq!(ratio_or_zero(100.0, 50.0), 2.0);
    }

    #[test]
    fn frequency_average_falls_back_when_no_readings() {
        assert_eq!(average_or(7.5, 3, 1.0), 2.5);
        assert_eq!(average_or(0.0, 0, 1.0), 1.0);
    }

    #[test]
    fn cpl_prefers_platform_leads_over_built_count() {
        assert_eq!(leads_for_calculation(40.0, 12), 40.0);
        assert_eq!(leads_for_calculation(0.0, 12), 12.0);
        assert_eq!(leads_for_calculation(0.0, 0), 0.0);
    }
}
