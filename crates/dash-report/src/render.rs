//! Loads the summary files back and splices them into the HTML template.

use std::path::Path;

use dash_core::error::{DashError, Result};
use dash_core::formatting::format_currency_brl;
use dash_core::models::KpiSet;
use dash_core::quarter::compare_labels;
use dash_data::summary::{
    CONSULTANT_FILE, KPIS_FILE, MONTHLY_FILE, QUARTER_FILE, REGIONAL_FILE, REGION_QUARTER_FILE,
    UNIT_FILE,
};
use serde::Serialize;
use tracing::info;

const TEMPLATE: &str = include_str!("assets/report.html");
const CSS: &str = include_str!("assets/report.css");
const JS: &str = include_str!("assets/report.js");

// ── Report data ───────────────────────────────────────────────────────────────

/// One (label, value) chart point read back from a summary table.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One (region, quarter, value) row read back from the two-key summary.
#[derive(Debug, Clone, Serialize)]
pub struct PairPoint {
    pub region: String,
    pub quarter: String,
    pub value: f64,
}

/// Everything the client-side chart script needs, serialized into the page.
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub kpis: KpiWidgets,
    pub regional: Vec<ChartPoint>,
    pub consultores: Vec<ChartPoint>,
    pub unidades: Vec<ChartPoint>,
    pub mensal: Vec<ChartPoint>,
    pub trimestres: Vec<ChartPoint>,
    pub regional_trimestre: Vec<PairPoint>,
}

/// Pre-formatted KPI widget values.
#[derive(Debug, Serialize)]
pub struct KpiWidgets {
    pub faturamento_total: String,
    pub ticket_medio: String,
    pub total_contratos: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atingimento_meta: Option<String>,
}

impl ReportData {
    /// Load KPI record and summary tables from `data_dir`.
    ///
    /// Every file is part of the intermediate contract; a missing one is
    /// fatal and names the expected path.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let kpis = load_kpis(data_dir)?;
        Ok(Self {
            kpis: KpiWidgets {
                faturamento_total: format_currency_brl(kpis.faturamento_total),
                ticket_medio: format_currency_brl(kpis.ticket_medio),
                total_contratos: kpis.total_contratos,
                atingimento_meta: kpis.atingimento_meta.map(|p| format!("{p:.1}%")),
            },
            regional: load_table(data_dir, REGIONAL_FILE)?,
            consultores: load_table(data_dir, CONSULTANT_FILE)?,
            unidades: load_table(data_dir, UNIT_FILE)?,
            mensal: load_table(data_dir, MONTHLY_FILE)?,
            trimestres: load_table(data_dir, QUARTER_FILE)?,
            regional_trimestre: load_pair_table(data_dir, REGION_QUARTER_FILE)?,
        })
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Build the self-contained dashboard page from loaded report data.
pub fn generate_html(data: &ReportData) -> Result<String> {
    let json_data = serde_json::to_string(data)?;
    let js = JS.replace("__JSON_DATA__", &json_data);
    Ok(TEMPLATE.replace("__CSS__", CSS).replace("__JS__", &js))
}

/// Render the dashboard for `data_dir` and write it to `output`.
pub fn render_dashboard(data_dir: &Path, output: &Path) -> Result<()> {
    let data = ReportData::load(data_dir)?;
    let html = generate_html(&data)?;
    std::fs::write(output, html)?;
    info!("Dashboard written to {}", output.display());
    Ok(())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn load_kpis(data_dir: &Path) -> Result<KpiSet> {
    let path = data_dir.join(KPIS_FILE);
    if !path.exists() {
        return Err(DashError::SummaryNotFound(path));
    }
    let raw = std::fs::read_to_string(&path).map_err(|source| DashError::FileRead {
        path: path.clone(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read one key+measure summary table into chart points, preserving the
/// row order the writer chose.
fn load_table(data_dir: &Path, file_name: &str) -> Result<Vec<ChartPoint>> {
    let path = data_dir.join(file_name);
    if !path.exists() {
        return Err(DashError::SummaryNotFound(path));
    }

    let mut reader = csv::Reader::from_path(&path)?;
    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let label = record.get(0).unwrap_or("").to_string();
        let value = record
            .get(1)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0);
        points.push(ChartPoint { label, value });
    }
    Ok(points)
}

/// Read the region × quarter summary, reordered by fiscal quarter then
/// region so the page can lay quarters out chronologically.
fn load_pair_table(data_dir: &Path, file_name: &str) -> Result<Vec<PairPoint>> {
    let path = data_dir.join(file_name);
    if !path.exists() {
        return Err(DashError::SummaryNotFound(path));
    }

    let mut reader = csv::Reader::from_path(&path)?;
    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let region = record.get(0).unwrap_or("").to_string();
        let quarter = record.get(1).unwrap_or("").to_string();
        let value = record
            .get(2)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0);
        points.push(PairPoint {
            region,
            quarter,
            value,
        });
    }
    points.sort_by(|a, b| {
        compare_labels(&a.quarter, &b.quarter).then_with(|| a.region.cmp(&b.region))
    });
    Ok(points)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
