//! Canonical alias tables for every logical field the engine resolves.
//!
//! Each list is ordered by priority: earlier aliases win. Aliases are
//! compared in normalized form, so accents, casing, and space/underscore
//! variants of these entries match too.

/// Presence probes used to classify rows by content.
pub mod probe {
    /// Fields whose presence marks an advertising-performance row.
    pub const ADVERTISING: &[&str] = &["Amount Spent", "investimento", "leads", "results"];
    /// Fields whose presence marks a sales-pipeline row.
    pub const PIPELINE: &[&str] = &["Nome Etapa", "etapa", "Status"];
    /// Fields whose presence marks a project master row.
    pub const MASTER: &[&str] = &["VGV", "unidades"];
}

/// Advertising-performance row fields.
pub mod advertising {
    /// Amount spent on the ad platform.
    pub const SPEND: &[&str] = &["Amount Spent", "investimento", "valor gasto", "spent"];
    /// Platform-reported lead/result count.
    pub const LEADS: &[&str] = &["leads", "lead count", "leads_gerados", "results", "resultados"];
    /// Unique audience reach.
    pub const REACH: &[&str] = &["Reach", "Alcance"];
    /// Ad impressions.
    pub const IMPRESSIONS: &[&str] = &["Impressions", "Impressoes"];
    /// Link clicks.
    pub const CLICKS: &[&str] = &["Link Clicks", "Cliques", "Clicks"];
    /// Average exposure frequency.
    pub const FREQUENCY: &[&str] = &["Frequency", "Frequencia"];
    /// Ad creative name.
    pub const AD_NAME: &[&str] = &["Ad Name", "Nome do Anuncio", "ad_name", "Anúncio"];
    /// Campaign name.
    pub const CAMPAIGN: &[&str] = &["Campaign", "Campanha", "campaign_name", "Campaign Name"];
    /// Ad set name.
    pub const AD_SET: &[&str] = &["Ad Set Name", "Conjunto de Anuncios", "ad_set_name", "adset_name"];
    /// Reporting date of the row.
    pub const DATE: &[&str] = &["Date", "Day", "dia", "data", "created_at"];
}

/// Video playback milestone counters (ad-platform export headers).
pub mod video {
    /// 3-second video plays.
    pub const VIEWS_3S: &[&str] = &[
        "3-second video plays",
        "Reproduções de vídeo de 3 segundos",
        "video_plays_3s",
        "views_3s",
    ];
    /// Plays reaching 25% of the video.
    pub const P25: &[&str] = &["Video plays at 25%", "Reproduções de vídeo até 25%", "video_p25"];
    /// Plays reaching 50% of the video.
    pub const P50: &[&str] = &["Video plays at 50%", "Reproduções de vídeo até 50%", "video_p50"];
    /// Plays reaching 75% of the video.
    pub const P75: &[&str] = &["Video plays at 75%", "Reproduções de vídeo até 75%", "video_p75"];
    /// Plays reaching 95% of the video.
    pub const P95: &[&str] = &["Video plays at 95%", "Reproduções de vídeo até 95%", "video_p95"];
    /// Plays reaching 100% of the video.
    pub const P100: &[&str] = &["Video plays at 100%", "Reproduções de vídeo até 100%", "video_p100"];
}

/// Sales-pipeline row fields.
pub mod pipeline {
    /// Stage display name.
    pub const STAGE_NAME: &[&str] = &["Nome Etapa", "Status", "etapa", "fase"];
    /// Numeric stage identifier.
    pub const STAGE_ID: &[&str] = &["ID Etapa", "Etapa ID", "id_etapa"];
    /// Monetary value of the deal.
    pub const SALE_VALUE: &[&str] = &["valor", "venda"];
    /// Number of units in the deal.
    pub const QUANTITY: &[&str] = &["quantidade", "units"];
    /// Contact name.
    pub const LEAD_NAME: &[&str] = &["nome", "cliente", "lead"];
    /// Contact e-mail.
    pub const EMAIL: &[&str] = &["email"];
    /// Contact phone.
    pub const PHONE: &[&str] = &["telefone", "phone"];
    /// Row creation or entry date.
    pub const DATE: &[&str] = &["data", "created_at"];
}

/// Project master row fields.
pub mod master {
    /// Total inventory units.
    pub const UNITS: &[&str] = &["unidades", "total unidades", "units", "quantidade"];
    /// Total potential sale value.
    pub const VGV: &[&str] = &["VGV", "valor geral vendas", "vgv total", "valor"];
    /// Project display name.
    pub const PROJECT_NAME: &[&str] =
        &["nome do empreendimento", "projeto", "empreendimento", "client"];
}
