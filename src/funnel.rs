//! Canonical sales funnel stages, stage matching, and display colors.

use crate::constants::funnel::{
    GRADIENT_HUE, GRADIENT_LIGHTNESS_FLOOR, GRADIENT_LIGHTNESS_SPAN, GRADIENT_LIGHTNESS_START,
    GRADIENT_SATURATION, SALE_COLOR, SALE_STAGE_FRAGMENTS, STAGE_COUNT, UNMATCHED_COLOR,
};
use crate::data::FunnelStage;
use crate::resolve::normalize_key;
use crate::types::ColorValue;

/// The eleven canonical stages in pipeline order, as normalized match terms.
pub const CANONICAL_STAGES: [&str; STAGE_COUNT] = [
    "entrada do lead",
    "qualificado",
    "mensagem inicial",
    "tentativa de contato",
    "em atendimento",
    "lead futuro",
    "pre agendamento",
    "reuniao agendada",
    "reuniao realizada",
    "proposta enviada",
    "vendas concluidas",
];

/// Position of the terminal completed-sale stage.
pub const SALE_STAGE_INDEX: usize = STAGE_COUNT - 1;

/// Returns `true` when a normalized stage name means a completed sale.
pub fn is_completed_sale(normalized_stage: &str) -> bool {
    SALE_STAGE_FRAGMENTS
        .iter()
        .any(|fragment| normalized_stage.contains(fragment))
}

/// Find the first canonical stage contained in a normalized stage name.
pub fn canonical_index(normalized_stage: &str) -> Option<usize> {
    CANONICAL_STAGES
        .iter()
        .position(|term| normalized_stage.contains(normalize_key(term).as_str()))
}

/// Display form of a canonical term: first letter uppercased.
pub fn display_name(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Color for a stage name.
///
/// Sale-flavored names get the fixed terminal color, names matching no
/// canonical stage get neutral gray, and everything else gets a blue whose
/// lightness darkens with stage position.
pub fn stage_color(name: &str) -> ColorValue {
    let normalized = normalize_key(name);
    if normalized.contains("venda") || normalized.contains("concluid") {
        return SALE_COLOR.to_string();
    }
    match canonical_index(&normalized) {
        None => UNMATCHED_COLOR.to_string(),
        Some(index) => {
            let step = GRADIENT_LIGHTNESS_SPAN / STAGE_COUNT as f64;
            let lightness =
                (GRADIENT_LIGHTNESS_START - index as f64 * step).max(GRADIENT_LIGHTNESS_FLOOR);
            format!("hsl({GRADIENT_HUE}, {GRADIENT_SATURATION}%, {lightness}%)")
        }
    }
}

/// Emit all canonical stages with their counts in fixed order.
pub fn build_funnel(counts: &[u64; STAGE_COUNT]) -> Vec<FunnelStage> {
    CANONICAL_STAGES
        .iter()
        .zip(counts.iter())
        .map(|(term, count)| FunnelStage {
            stage: display_name(term),
            count: *count,
            color: stage_color(term),
        })
        .collect()
}
