use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_EVIDENCE_DIR: &str = "Bewijslasten";
pub const DEFAULT_HEADER_ROWS: usize = 43;
pub const DEFAULT_REFRESH_COOLDOWN_SECS: u64 = 3;
pub const DEFAULT_CARDS_PER_ROW: usize = 5;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Name of the subfolder holding one directory per identifier.
    pub evidence_dir_name: String,
    /// Title/header block rows skipped before the first candidate record row.
    pub header_rows: usize,
    pub refresh_cooldown_secs: u64,
    pub cards_per_row: usize,
}

impl AppConfig {
    pub fn refresh_cooldown(&self) -> Duration {
        Duration::from_secs(self.refresh_cooldown_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            evidence_dir_name: DEFAULT_EVIDENCE_DIR.to_string(),
            header_rows: DEFAULT_HEADER_ROWS,
            refresh_cooldown_secs: DEFAULT_REFRESH_COOLDOWN_SECS,
            cards_per_row: DEFAULT_CARDS_PER_ROW,
        }
    }
}

/// Defaults, then an optional `Config.*` file, then `CHECKER_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    load_configuration_from("Config")
}

pub fn load_configuration_from(file_stem: &str) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .set_default("evidence_dir_name", DEFAULT_EVIDENCE_DIR)?
        .set_default("header_rows", DEFAULT_HEADER_ROWS as i64)?
        .set_default("refresh_cooldown_secs", DEFAULT_REFRESH_COOLDOWN_SECS as i64)?
        .set_default("cards_per_row", DEFAULT_CARDS_PER_ROW as i64)?
        .add_source(ConfigFile::with_name(file_stem).required(false))
        .add_source(Environment::with_prefix("CHECKER").try_parsing(true))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
