use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::SummarizeUseCase;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::ConfigService;
use crate::interfaces::cli::Cli;

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // .env may carry RUST_LOG as well as CSV_SUMMARY_* settings
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "csv-summary failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

pub fn execute(cli: &Cli) -> Result<()> {
    let config = ConfigService::new(cli.config.as_deref())?
        .with_overrides(&cli.overrides())
        .load()?;

    if cli.print_config {
        let rendered = serde_json::to_string_pretty(&config)
            .map_err(|e| AppError::ConfigError(format!("Failed to render config: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    let outcome = SummarizeUseCase::new(config).summarize_file(&cli.input, cli.output.as_deref())?;

    for column in &outcome.report.columns {
        info!(
            column = %column.header,
            distinct = column.distinct_values,
            classification = %column.classification,
            "column summary"
        );
    }
    info!(
        rows = outcome.report.row_count,
        output = %outcome.output_path.display(),
        "done"
    );
    println!("{}", outcome.output_path.display());

    Ok(())
}
