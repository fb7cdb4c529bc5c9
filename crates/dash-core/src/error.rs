use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the dashboard pipeline.
#[derive(Error, Debug)]
pub enum DashError {
    /// The configured input CSV does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more configured column names are absent from the CSV header.
    /// Carries both lists so the operator can spot the mismatch directly.
    #[error("Missing configured columns: [{}]. Columns found in file: [{}]", missing.join(", "), found.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// A summary file expected by the report stage is absent.
    #[error("Summary file not found: {0} (run the preprocess stage first)")]
    SummaryNotFound(PathBuf),

    /// A delimited record could not be read at all.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A quarter label did not match the `NTriYY` shape.
    #[error("Invalid quarter label: {0}")]
    QuarterLabel(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_input_not_found() {
        let err = DashError::InputNotFound(PathBuf::from("dados.csv"));
        assert_eq!(err.to_string(), "Input file not found: dados.csv");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashError::FileRead {
            path: PathBuf::from("/some/dados.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/dados.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_columns_lists_both_sides() {
        let err = DashError::MissingColumns {
            missing: vec!["data da venda".into(), "regional".into()],
            found: vec!["Data".into(), "Valor".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("data da venda"));
        assert!(msg.contains("regional"));
        assert!(msg.contains("Data"));
        assert!(msg.contains("Valor"));
    }

    #[test]
    fn test_error_display_summary_not_found() {
        let err = DashError::SummaryNotFound(PathBuf::from("kpis.json"));
        let msg = err.to_string();
        assert!(msg.contains("kpis.json"));
        assert!(msg.contains("preprocess"));
    }

    #[test]
    fn test_error_display_quarter_label() {
        let err = DashError::QuarterLabel("Tri".to_string());
        assert_eq!(err.to_string(), "Invalid quarter label: Tri");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: DashError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }
}
