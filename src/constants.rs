/// Constants used by row classification heuristics.
pub mod classify {
    /// Table-name fragment hinting at advertising-performance rows.
    pub const TABLE_HINT_ADVERTISING: &str = "marketing";
    /// Table-name fragment hinting at sales-pipeline rows.
    pub const TABLE_HINT_PIPELINE: &str = "venda";
    /// Table-name fragment hinting at project master rows.
    pub const TABLE_HINT_MASTER: &str = "dados";
}

/// Constants used by the funnel stage canon and its coloring.
pub mod funnel {
    /// Number of canonical funnel stages.
    pub const STAGE_COUNT: usize = 11;
    /// Reserved CRM stage id that always means a completed sale.
    pub const SALE_STAGE_ID: &str = "14";
    /// Normalized fragments that mark a stage name as a completed sale.
    pub const SALE_STAGE_FRAGMENTS: [&str; 2] = ["vendasconcluidas", "vendasconcluida"];
    /// Color for the completed-sale stage.
    pub const SALE_COLOR: &str = "#10b981";
    /// Color for stage names that match no canonical stage.
    pub const UNMATCHED_COLOR: &str = "#94a3b8";
    /// Hue of the position-based stage gradient.
    pub const GRADIENT_HUE: u32 = 214;
    /// Saturation of the position-based stage gradient, in percent.
    pub const GRADIENT_SATURATION: u32 = 66;
    /// Lightness of the first gradient stage, in percent.
    pub const GRADIENT_LIGHTNESS_START: f64 = 85.0;
    /// Lightness floor applied to late stages, in percent.
    pub const GRADIENT_LIGHTNESS_FLOOR: f64 = 25.0;
    /// Total lightness span distributed across the stage list, in percent.
    pub const GRADIENT_LIGHTNESS_SPAN: f64 = 50.0;
}

/// Placeholder values substituted when a field fails to resolve.
pub mod defaults {
    /// Generic placeholder for unresolved text fields.
    pub const PLACEHOLDER: &str = "---";
    /// Ad name used when a creative row has no resolvable ad name.
    pub const UNNAMED_AD: &str = "Sem Nome";
    /// Project name used when master rows supply none.
    pub const UNNAMED_PROJECT: &str = "Sem Projeto";
    /// Pipeline label attached to every built lead entry.
    pub const DEFAULT_PIPELINE: &str = "Padrão";
    /// Frequency reported when no row carried a nonzero frequency reading.
    pub const FREQUENCY_FALLBACK: f64 = 1.0;
}

/// Constants used by goal scaling and status classification.
pub mod goals {
    /// Days assumed per month when scaling monthly targets.
    pub const DAYS_PER_MONTH: f64 = 30.0;
    /// Tolerance band around the target before a status leaves the average tier.
    pub const STATUS_BUFFER: f64 = 0.05;
}

/// Constants used by the acquisition boundary.
pub mod acquisition {
    /// Default number of rows requested per table page.
    pub const DEFAULT_PAGE_SIZE: usize = 1000;
    /// Default cap on rows drained from a single table per refresh.
    pub const DEFAULT_MAX_ROWS_PER_TABLE: usize = 100_000;
    /// Failure reason recorded when a table fetch thread panics.
    pub const FETCH_PANIC_REASON: &str = "table fetch thread panicked";
}

/// Constants used by the aggregation fold.
pub mod aggregate {
    /// Seed mixed into lead-id hashing so ids are stable but namespaced.
    pub const LEAD_ID_SEED: u64 = 0x1EAD_5EED;
}
