//! List indicators command.

use anyhow::Result;
use ta_indicators::Registry;

pub async fn run() -> Result<()> {
    let registry = Registry::new();

    println!("Available Indicators");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        println!("  {} ({} parameter(s): {})", info.name, info.arity, info.param_names.join(", "));
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!();
    }

    println!("Use --indicators NAME:p1-p2,... to select indicators.");
    println!();
    println!("Indicator names: {}", registry.names().join(", "));

    Ok(())
}
