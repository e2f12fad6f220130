//! Compute command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use ta_indicators::{Dispatcher, Registry};
use ta_report::InstrumentReport;
use tracing::info;

use super::context::{apply_overrides, load_or_default, RunContext};
use crate::cli::{ComputeArgs, OutputFormat};

pub async fn run(args: ComputeArgs, config_path: &Path) -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    let mut config = load_or_default(config_path)?;
    apply_overrides(&mut config, &args.run, args.indicators.as_deref());
    let context = RunContext::new(config, &registry)?;

    let specs = context.config.run.indicator_specs()?;
    let column = context.config.run.column.clone();
    info!(
        tickers = context.config.run.tickers.len(),
        indicators = specs.len(),
        "Starting computation"
    );

    let outcome = context.fetch().await?;

    let mut reports = Vec::with_capacity(outcome.tables.len());
    for (ticker, table) in outcome.tables {
        let batch = dispatcher
            .compute_all(&table, &specs, &column)
            .with_context(|| format!("Failed to compute indicators for {}", ticker))?;

        let mut report = InstrumentReport::new(&ticker, &column, table);
        report.results = batch.results;
        report.skipped = batch.skipped;
        reports.push(report);
    }

    // Output results
    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.summary());
            }
            for skipped in &outcome.skipped {
                println!("{}: skipped ({})", skipped.key, skipped.reason);
            }
        }
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = serde_json::to_string_pretty(&reports)?;
        tokio::fs::write(save_path, json)
            .await
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}
