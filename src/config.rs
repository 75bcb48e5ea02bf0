use crate::constants::acquisition;

/// Controls how table rows are acquired during a refresh.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Rows requested per page while draining a table.
    pub page_size: usize,
    /// Upper bound on rows drained from one table per refresh.
    ///
    /// A source that keeps returning full pages stops here instead of
    /// looping forever.
    pub max_rows_per_table: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: acquisition::DEFAULT_PAGE_SIZE,
            max_rows_per_table: acquisition::DEFAULT_MAX_ROWS_PER_TABLE,
        }
    }
}
