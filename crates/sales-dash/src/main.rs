mod bootstrap;

use anyhow::Result;
use dash_core::columns::ColumnConfig;
use dash_core::settings::Settings;
use dash_data::loader::load_transactions;
use dash_data::summary::SummaryWriter;
use dash_report::render::render_dashboard;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("sales-dash v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Mode: {}, input: {}, data dir: {}",
        settings.mode,
        settings.input.display(),
        settings.data_dir.display()
    );

    // Column names are compiled-in constants, edited per dataset.
    let config = ColumnConfig::default();

    match settings.mode.as_str() {
        "preprocess" => {
            preprocess(&settings, &config)?;
        }

        "report" => {
            render_dashboard(&settings.data_dir, &settings.output)?;
        }

        "full" => {
            preprocess(&settings, &config)?;
            render_dashboard(&settings.data_dir, &settings.output)?;
        }

        unknown => {
            eprintln!("Unknown mode: {}", unknown);
        }
    }

    Ok(())
}

/// Stage 1–3: load and clean the export, aggregate, write the summary set.
///
/// The cleaned dataset is loaded once here and handed down; the report
/// stage only ever sees the summary files.
fn preprocess(settings: &Settings, config: &ColumnConfig) -> Result<()> {
    std::fs::create_dir_all(&settings.data_dir)?;

    let transactions = load_transactions(&settings.input, config)?;

    let writer = SummaryWriter::new(&settings.data_dir, config);
    let kpis = writer.write_all(&transactions)?;

    tracing::info!(
        "Aggregation done: {} contracts, total revenue {:.2}",
        kpis.total_contratos,
        kpis.faturamento_total
    );

    Ok(())
}
