//! Compare command implementation.

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use ta_config::parse_indicator_specs;
use ta_indicators::{aggregate, Dispatcher, Registry};
use ta_report::table_to_csv;
use tracing::warn;

use super::context::{apply_overrides, load_or_default, RunContext};
use crate::cli::{CompareArgs, CompareFormat};

pub async fn run(args: CompareArgs, config_path: &Path) -> Result<()> {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);

    let mut specs = parse_indicator_specs(&args.indicator)?;
    if specs.len() != 1 {
        anyhow::bail!("Expected exactly one indicator to compare, got {}", specs.len());
    }
    let spec = specs.remove(0);

    let mut config = load_or_default(config_path)?;
    apply_overrides(&mut config, &args.run, Some(args.indicator.as_str()));
    let normalize = args.normalize || config.run.normalize;
    let context = RunContext::new(config, &registry)?;
    let column = &context.config.run.column;

    let outcome = context.fetch().await?;
    let aggregation = aggregate(&dispatcher, &outcome.tables, &spec, column)
        .with_context(|| format!("Failed to compare {}", spec))?;

    for skipped in &aggregation.skipped {
        warn!(ticker = %skipped.key, reason = %skipped.reason, "Left out of comparison");
    }

    let tables: Vec<_> = aggregation
        .tables
        .iter()
        .map(|(name, table)| {
            let table = if normalize { table.normalized() } else { table.clone() };
            (name.as_str(), table)
        })
        .collect();

    match args.output {
        CompareFormat::Csv => {
            for (name, table) in &tables {
                if tables.len() > 1 {
                    println!("# {}", name);
                }
                print!("{}", table_to_csv(table)?);
            }
        }
        CompareFormat::Json => {
            let value = json!({
                "label": aggregation.label,
                "normalized": normalize,
                "tables": tables
                    .iter()
                    .map(|(name, table)| json!({ "name": name, "table": table }))
                    .collect::<Vec<_>>(),
                "skipped": aggregation.skipped.iter().chain(&outcome.skipped).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}
