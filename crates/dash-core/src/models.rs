use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Sentinel label used for blank categorical cells.
///
/// Blank dates or amounts drop the row; blank categories keep the row and
/// get this label instead, so every group-by still covers the full dataset.
pub const NOT_INFORMED: &str = "Não informado";

/// One cleaned sales event read from the input CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date of the sale (day-first in the source file).
    pub sale_date: NaiveDate,
    /// Total sale amount in BRL.
    pub amount: f64,
    /// Sales region the contract belongs to.
    pub region: String,
    /// Consultant who closed the sale.
    pub consultant: String,
    /// Business unit of the contract.
    pub business_unit: String,
    /// Contract modality (e.g. new vs. renewal); sentinel-filled when absent.
    #[serde(default)]
    pub contract_type: Option<String>,
    /// Partner associated with the sale, when the dataset carries one.
    #[serde(default)]
    pub partner: Option<String>,
    /// Sales goal for this contract in BRL, when the dataset carries one.
    #[serde(default)]
    pub goal: Option<f64>,
    /// Fiscal quarter label, e.g. `"1Tri23"`. Taken from the configured
    /// quarter column when present, otherwise derived from `sale_date`.
    pub quarter_label: String,
    /// Calendar year of the sale.
    pub year: i32,
}

impl Transaction {
    /// Month grouping key in `"%Y-%m"` form.
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.sale_date.year(), self.sale_date.month())
    }
}

/// The scalar KPI record computed once per pipeline run.
///
/// Serialized as a flat key→number JSON object; the field names are the
/// stable contract consumed by the report stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    /// Total revenue: sum of all cleaned sale amounts.
    pub faturamento_total: f64,
    /// Contract count: number of cleaned rows.
    pub total_contratos: u64,
    /// Average ticket: total / count, defined as 0 when the count is 0.
    pub ticket_medio: f64,
    /// Goal attainment in percent, present only when goal data exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atingimento_meta: Option<f64>,
}

impl KpiSet {
    /// Build the KPI set from a total and a count, guarding the average
    /// against an empty dataset.
    pub fn from_totals(total: f64, count: u64, attainment: Option<f64>) -> Self {
        let average = if count > 0 { total / count as f64 } else { 0.0 };
        Self {
            faturamento_total: total,
            total_contratos: count,
            ticket_medio: average,
            atingimento_meta: attainment,
        }
    }
}
