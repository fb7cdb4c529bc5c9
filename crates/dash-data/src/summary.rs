//! Intermediate summary persistence.
//!
//! Each pipeline run rewrites every summary file in full; there is no
//! append. The tabular files carry the configured key column name(s)
//! followed by the measure column name, so the report stage can consume
//! them by header without knowing the loader's configuration.

use std::path::Path;

use dash_core::columns::ColumnConfig;
use dash_core::error::Result;
use dash_core::models::{KpiSet, Transaction};
use tracing::info;

use crate::aggregator::{GroupSum, PairSum, SalesAggregator};

/// Fixed intermediate file names, shared with the report stage.
pub const KPIS_FILE: &str = "kpis.json";
pub const REGIONAL_FILE: &str = "summary_regional.csv";
pub const CONSULTANT_FILE: &str = "summary_consultor.csv";
pub const UNIT_FILE: &str = "summary_unidade.csv";
pub const MONTHLY_FILE: &str = "summary_mensal.csv";
pub const QUARTER_FILE: &str = "summary_trimestre.csv";
pub const REGION_QUARTER_FILE: &str = "summary_regional_trimestre.csv";

/// How many consultants the ranking keeps.
pub const TOP_CONSULTANTS: usize = 10;

/// Writes every aggregation result and the KPI record under one directory.
pub struct SummaryWriter<'a> {
    out_dir: &'a Path,
    config: &'a ColumnConfig,
}

impl<'a> SummaryWriter<'a> {
    pub fn new(out_dir: &'a Path, config: &'a ColumnConfig) -> Self {
        Self { out_dir, config }
    }

    /// Run every aggregation over the cleaned dataset and persist the full
    /// summary set: KPIs plus the six tabular files.
    pub fn write_all(&self, transactions: &[Transaction]) -> Result<KpiSet> {
        let kpis = SalesAggregator::compute_kpis(transactions);
        self.write_kpis(&kpis)?;

        self.write_table(
            REGIONAL_FILE,
            &self.config.region,
            &SalesAggregator::sum_by(transactions, |t| t.region.clone()),
        )?;
        self.write_table(
            CONSULTANT_FILE,
            &self.config.consultant,
            &SalesAggregator::top_n(
                transactions,
                |t| t.consultant.clone(),
                TOP_CONSULTANTS,
            ),
        )?;
        self.write_table(
            UNIT_FILE,
            &self.config.business_unit,
            &SalesAggregator::sum_by(transactions, |t| t.business_unit.clone()),
        )?;
        self.write_table(
            MONTHLY_FILE,
            "mes",
            &SalesAggregator::sum_by_month(transactions),
        )?;
        self.write_table(
            QUARTER_FILE,
            "trimestre",
            &SalesAggregator::sum_by_quarter(transactions),
        )?;
        self.write_pair_table(
            REGION_QUARTER_FILE,
            &self.config.region,
            "trimestre",
            &SalesAggregator::sum_by_pair(
                transactions,
                |t| t.region.clone(),
                |t| t.quarter_label.clone(),
            ),
        )?;

        Ok(kpis)
    }

    /// Serialize the KPI record as a flat JSON object, overwriting any
    /// previous run.
    pub fn write_kpis(&self, kpis: &KpiSet) -> Result<()> {
        let path = self.out_dir.join(KPIS_FILE);
        let json = serde_json::to_string_pretty(kpis)?;
        std::fs::write(&path, json)?;
        info!("KPI record written to {}", path.display());
        Ok(())
    }

    /// Write one key+measure summary table.
    pub fn write_table(&self, file_name: &str, key_column: &str, rows: &[GroupSum]) -> Result<()> {
        let path = self.out_dir.join(file_name);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record([key_column, self.config.amount.as_str()])?;
        for row in rows {
            let total = row.total.to_string();
            writer.write_record([row.key.as_str(), total.as_str()])?;
        }
        writer.flush()?;
        info!("Summary written to {} ({} groups)", path.display(), rows.len());
        Ok(())
    }

    /// Write one two-key summary table (key A, key B, measure).
    pub fn write_pair_table(
        &self,
        file_name: &str,
        key_a_column: &str,
        key_b_column: &str,
        rows: &[PairSum],
    ) -> Result<()> {
        let path = self.out_dir.join(file_name);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record([key_a_column, key_b_column, self.config.amount.as_str()])?;
        for row in rows {
            let total = row.total.to_string();
            writer.write_record([row.key_a.as_str(), row.key_b.as_str(), total.as_str()])?;
        }
        writer.flush()?;
        info!("Summary written to {} ({} groups)", path.display(), rows.len());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dash_core::quarter::quarter_label;
    use tempfile::TempDir;

    fn make_tx(date: &str, amount: f64, region: &str, consultant: &str) -> Transaction {
        let sale_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Transaction {
            sale_date,
            amount,
            region: region.to_string(),
            consultant: consultant.to_string(),
            business_unit: "Saúde".to_string(),
            contract_type: None,
            partner: None,
            goal: None,
            quarter_label: quarter_label(sale_date),
            year: 2023,
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            make_tx("2023-01-10", 100.0, "Sul", "Ana"),
            make_tx("2023-02-11", 300.0, "Norte", "Bia"),
            make_tx("2023-04-12", 50.0, "Sul", "Ana"),
        ]
    }

    #[test]
    fn test_write_all_creates_every_file() {
        let dir = TempDir::new().unwrap();
        let config = ColumnConfig::default();
        let writer = SummaryWriter::new(dir.path(), &config);

        writer.write_all(&sample_transactions()).unwrap();

        for name in [
            KPIS_FILE,
            REGIONAL_FILE,
            CONSULTANT_FILE,
            UNIT_FILE,
            MONTHLY_FILE,
            QUARTER_FILE,
            REGION_QUARTER_FILE,
        ] {
            assert!(dir.path().join(name).exists(), "{name} must exist");
        }
    }

    #[test]
    fn test_table_header_uses_configured_names() {
        let dir = TempDir::new().unwrap();
        let config = ColumnConfig::default();
        let writer = SummaryWriter::new(dir.path(), &config);
        writer.write_all(&sample_transactions()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(REGIONAL_FILE)).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "regional,Valor total da venda");
    }

    #[test]
    fn test_kpis_file_round_trips() {
        let dir = TempDir::new().unwrap();
        let config = ColumnConfig::default();
        let writer = SummaryWriter::new(dir.path(), &config);
        let kpis = writer.write_all(&sample_transactions()).unwrap();

        let raw = std::fs::read_to_string(dir.path().join(KPIS_FILE)).unwrap();
        let loaded: KpiSet = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded, kpis);
        assert!((loaded.faturamento_total - 450.0).abs() < 1e-9);
        assert_eq!(loaded.total_contratos, 3);
    }

    #[test]
    fn test_rerun_overwrites_in_full() {
        let dir = TempDir::new().unwrap();
        let config = ColumnConfig::default();
        let writer = SummaryWriter::new(dir.path(), &config);

        writer.write_all(&sample_transactions()).unwrap();
        let first = std::fs::read_to_string(dir.path().join(REGIONAL_FILE)).unwrap();

        // Second run over a smaller dataset must fully replace the file.
        writer
            .write_all(&[make_tx("2023-01-10", 10.0, "Sul", "Ana")])
            .unwrap();
        let second = std::fs::read_to_string(dir.path().join(REGIONAL_FILE)).unwrap();

        assert_ne!(first, second);
        assert_eq!(second.lines().count(), 2); // header + one region
        assert!(!second.contains("Norte"));
    }

    #[test]
    fn test_pair_table_has_three_columns() {
        let dir = TempDir::new().unwrap();
        let config = ColumnConfig::default();
        let writer = SummaryWriter::new(dir.path(), &config);
        writer.write_all(&sample_transactions()).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join(REGION_QUARTER_FILE)).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "regional,trimestre,Valor total da venda");
        // Three observed (region, quarter) pairs from the sample set.
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_empty_dataset_still_writes_files() {
        let dir = TempDir::new().unwrap();
        let config = ColumnConfig::default();
        let writer = SummaryWriter::new(dir.path(), &config);
        let kpis = writer.write_all(&[]).unwrap();

        assert_eq!(kpis.total_contratos, 0);
        assert_eq!(kpis.ticket_medio, 0.0);
        let content = std::fs::read_to_string(dir.path().join(MONTHLY_FILE)).unwrap();
        assert_eq!(content.lines().count(), 1); // header only
    }
}
