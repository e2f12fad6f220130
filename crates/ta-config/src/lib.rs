//! Configuration management.

mod error;
mod settings;
mod specs;

pub use error::{ConfigValidationError, SpecParseError};
pub use settings::{
    AppConfig, AppSettings, DataSettings, IndicatorEntry, IndicatorList, LoggingConfig, RunSettings,
};
pub use specs::parse_indicator_specs;

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `TA` prefix with `__` between sections,
/// e.g. `TA__RUN__COLUMN=Open`. `TA__RUN__TICKERS` takes a comma-separated list.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("TA")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("run.tickers")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_indicators::Registry;

    #[test]
    fn test_load_config() {
        let dir = std::env::temp_dir().join(format!("ta-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("engine.toml");
        std::fs::write(
            &path,
            r#"
[data]
data_dir = "fixtures"

[run]
tickers = ["AAPL", "MSFT"]
start_date = "2024-01-01"
end_date = "2024-06-30"
indicators = [
    { name = "SMA", params = [20] },
    { name = "OBV" },
]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.data.data_dir, "fixtures");
        assert_eq!(config.data.fetch_delay_ms, 1000);
        assert_eq!(config.run.column, "Close");
        assert_eq!(config.run.indicator_specs().unwrap()[0].label(), "SMA_20");
        assert!(config.validate(&Registry::new()).is_ok());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config(Path::new("does/not/exist.toml")).is_err());
    }
}
