//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use ta_config::load_config;
use ta_indicators::Registry;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    let registry = Registry::new();
    if let Err(e) = config.validate(&registry) {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();

    let labels: Vec<String> = config.run.indicator_specs()?.iter().map(|s| s.label()).collect();
    println!("Indicators: {}", labels.join(", "));
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
