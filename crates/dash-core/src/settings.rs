use clap::Parser;
use std::path::PathBuf;

/// Static sales-analytics dashboard generator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dash",
    about = "Generates a static sales dashboard from a CSV export",
    version
)]
pub struct Settings {
    /// Pipeline stage to run
    #[arg(long, default_value = "full", value_parser = ["full", "preprocess", "report"])]
    pub mode: String,

    /// Input CSV with the raw transaction export
    #[arg(long, default_value = "dados.csv")]
    pub input: PathBuf,

    /// Directory holding the intermediate summary files
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Path of the generated HTML dashboard
    #[arg(long, default_value = "index.html")]
    pub output: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` log-level override.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, so
    /// tests do not need to spawn a subprocess.
    pub fn from_args(args: Vec<std::ffi::OsString>) -> Self {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::from_args(vec!["sales-dash".into()]);
        assert_eq!(settings.mode, "full");
        assert_eq!(settings.input, PathBuf::from("dados.csv"));
        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert_eq!(settings.output, PathBuf::from("index.html"));
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_explicit_mode() {
        let settings =
            Settings::from_args(vec!["sales-dash".into(), "--mode".into(), "report".into()]);
        assert_eq!(settings.mode, "report");
    }

    #[test]
    fn test_settings_explicit_paths() {
        let settings = Settings::from_args(vec![
            "sales-dash".into(),
            "--input".into(),
            "/tmp/vendas.csv".into(),
            "--data-dir".into(),
            "/tmp/out".into(),
        ]);
        assert_eq!(settings.input, PathBuf::from("/tmp/vendas.csv"));
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::from_args(vec!["sales-dash".into(), "--debug".into()]);
        assert_eq!(settings.log_level, "DEBUG");
    }
}
