use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::{debug, info};

use super::settings::DashboardConfig;
use crate::error::{DashboardError, Result};

pub const ENV_PREFIX: &str = "TERMINAL";

/// Defaults, then the TOML file at `path` if present, then `TERMINAL__*`
/// environment variables (`TERMINAL__SERVER__PORT=9000`).
pub fn load_config(path: &str) -> Result<DashboardConfig> {
    if dotenvy::dotenv().is_ok() {
        debug!("Loaded .env");
    }

    let exists = Path::new(path).exists();
    let settings = Config::builder()
        .add_source(Config::try_from(&DashboardConfig::default())?)
        .add_source(File::new(path, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("news.keywords"),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config
        .validate()
        .map_err(|errors| DashboardError::InvalidConfig(errors.join(", ")))?;

    if exists {
        info!("Configuration loaded from {}", path);
    } else {
        info!("No {} found, using defaults", path);
    }
    Ok(config)
}

/// The effective configuration as TOML.
pub fn render_toml(config: &DashboardConfig) -> std::result::Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}
