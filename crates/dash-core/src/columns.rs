//! Column-name configuration and header resolution.
//!
//! Column names are compiled-in constants edited per dataset; a mismatch
//! between this configuration and the CSV header is a configuration error
//! and aborts the run before any row is parsed.

use crate::error::{DashError, Result};

/// Configured CSV column names for one dataset.
///
/// The required fields drive row cleaning; the optional ones enable extra
/// dimensions (partner, goal, explicit quarter labels) when the export
/// carries them.
#[derive(Debug, Clone)]
pub struct ColumnConfig {
    pub date: String,
    pub amount: String,
    pub region: String,
    pub consultant: String,
    pub business_unit: String,
    pub contract_type: Option<String>,
    pub partner: Option<String>,
    pub goal: Option<String>,
    pub quarter: Option<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date: "data da venda".to_string(),
            amount: "Valor total da venda".to_string(),
            region: "regional".to_string(),
            consultant: "consultor".to_string(),
            business_unit: "unid negocio".to_string(),
            // Only the columns the pipeline actually consumes are required
            // out of the box; extra dimensions are opt-in.
            contract_type: None,
            partner: None,
            goal: None,
            quarter: None,
        }
    }
}

/// Resolved header positions for a [`ColumnConfig`] against one CSV header.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    pub date: usize,
    pub amount: usize,
    pub region: usize,
    pub consultant: usize,
    pub business_unit: usize,
    pub contract_type: Option<usize>,
    pub partner: Option<usize>,
    pub goal: Option<usize>,
    pub quarter: Option<usize>,
}

impl ColumnConfig {
    /// All configured names, required first, in a stable order.
    pub fn configured_names(&self) -> Vec<&str> {
        let mut names = vec![
            self.date.as_str(),
            self.amount.as_str(),
            self.region.as_str(),
            self.consultant.as_str(),
            self.business_unit.as_str(),
        ];
        for opt in [
            &self.contract_type,
            &self.partner,
            &self.goal,
            &self.quarter,
        ] {
            if let Some(name) = opt {
                names.push(name.as_str());
            }
        }
        names
    }

    /// Resolve every configured name to its header position.
    ///
    /// Fails with [`DashError::MissingColumns`] listing both the missing
    /// configured names and the full header actually found, so a renamed
    /// export is diagnosable from the message alone.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnIndex> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = self
            .configured_names()
            .into_iter()
            .filter(|name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DashError::MissingColumns {
                missing,
                found: headers.to_vec(),
            });
        }

        // All positions exist past this point.
        let required = |name: &str| position(name).unwrap_or_default();
        let optional = |name: &Option<String>| name.as_deref().and_then(position);

        Ok(ColumnIndex {
            date: required(&self.date),
            amount: required(&self.amount),
            region: required(&self.region),
            consultant: required(&self.consultant),
            business_unit: required(&self.business_unit),
            contract_type: optional(&self.contract_type),
            partner: optional(&self.partner),
            goal: optional(&self.goal),
            quarter: optional(&self.quarter),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_requires_only_consumed_columns() {
        let config = ColumnConfig::default();
        assert_eq!(config.configured_names().len(), 5);
        let hdr = headers(&[
            "data da venda",
            "Valor total da venda",
            "regional",
            "consultor",
            "unid negocio",
        ]);
        // A five-column export resolves without any opt-in dimension.
        let index = config.resolve(&hdr).unwrap();
        assert!(index.contract_type.is_none());
    }

    #[test]
    fn test_resolve_all_present() {
        let config = ColumnConfig::default();
        let hdr = headers(&[
            "data da venda",
            "Valor total da venda",
            "regional",
            "consultor",
            "unid negocio",
        ]);
        let index = config.resolve(&hdr).unwrap();
        assert_eq!(index.date, 0);
        assert_eq!(index.amount, 1);
        assert_eq!(index.business_unit, 4);
        assert!(index.quarter.is_none());
    }

    #[test]
    fn test_resolve_out_of_order_header() {
        let config = ColumnConfig::default();
        let hdr = headers(&[
            "consultor",
            "regional",
            "unid negocio",
            "data da venda",
            "Valor total da venda",
        ]);
        let index = config.resolve(&hdr).unwrap();
        assert_eq!(index.consultant, 0);
        assert_eq!(index.date, 3);
    }

    #[test]
    fn test_resolve_trims_header_whitespace() {
        let config = ColumnConfig::default();
        let hdr = headers(&[
            " data da venda ",
            "Valor total da venda",
            "regional",
            "consultor",
            "unid negocio",
        ]);
        assert!(config.resolve(&hdr).is_ok());
    }

    #[test]
    fn test_resolve_missing_column_enumerates_both_lists() {
        let config = ColumnConfig::default();
        let hdr = headers(&["Data", "Valor", "regional", "consultor", "unid negocio"]);
        let err = config.resolve(&hdr).unwrap_err();
        match err {
            DashError::MissingColumns { missing, found } => {
                assert_eq!(missing, vec!["data da venda", "Valor total da venda"]);
                assert_eq!(found, hdr);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_optional_quarter_column() {
        let config = ColumnConfig {
            quarter: Some("trimestre".to_string()),
            ..ColumnConfig::default()
        };
        let hdr = headers(&[
            "data da venda",
            "Valor total da venda",
            "regional",
            "consultor",
            "unid negocio",
            "trimestre",
        ]);
        let index = config.resolve(&hdr).unwrap();
        assert_eq!(index.quarter, Some(5));
    }

    #[test]
    fn test_resolve_missing_optional_column_is_fatal() {
        // An optional dimension, once configured, is still a contract.
        let config = ColumnConfig {
            goal: Some("meta".to_string()),
            ..ColumnConfig::default()
        };
        let hdr = headers(&[
            "data da venda",
            "Valor total da venda",
            "regional",
            "consultor",
            "unid negocio",
        ]);
        let err = config.resolve(&hdr).unwrap_err();
        match err {
            DashError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["meta"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
