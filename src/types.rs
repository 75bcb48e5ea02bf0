/// Name of a logical table in the remote store.
/// Examples: `Marketing_12`, `Vendas_12`, `Dados`
pub type TableName = String;
/// Raw column name as it appears in a source row.
/// Examples: `Amount Spent`, `Conjunto de Anúncios`, `id_etapa`
pub type FieldName = String;
/// Normalized key form used for fuzzy matching.
/// Example: `conjuntodeanuncios` (from `Conjunto de Anúncios`)
pub type NormalizedKey = String;
/// Ad creative display name.
/// Examples: `Video Lançamento 01`, `Sem Nome`
pub type AdName = String;
/// Pipeline stage display name as found in CRM rows.
/// Examples: `Entrada do Lead`, `Vendas Concluídas`
pub type StageName = String;
/// Deterministic lead identifier.
/// Example: `lead-3-c0ffee17deadbeef`
pub type LeadId = String;
/// CSS color literal attached to funnel stages.
/// Examples: `#10b981`, `hsl(214, 66%, 85%)`
pub type ColorValue = String;
/// Raw date value carried through from source rows (not reparsed).
/// Examples: `2025-03-14`, `14/03/2025`
pub type RawDate = String;
