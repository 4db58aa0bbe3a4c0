use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// CLI settings.
///
/// Sources, later ones win: built-in defaults, `config/default`,
/// `config/{CURATOR_ENV}`, then `CURATOR__*` environment variables
/// (e.g. `CURATOR__CATALOG__PATH=/srv/catalog.json`).
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub aliveness: AlivenessSettings,
    pub push: PushSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct CatalogSettings {
    /// Catalog written by the previous cycle.
    pub path: PathBuf,
    /// Write the refreshed catalog back to `path`.
    pub persist: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlivenessSettings {
    /// Probe result (`{ url: bool }`). Without it the expiry pass is skipped.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct PushSettings {
    /// Root directory for the local push channel.
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// Fallback filter when `RUST_LOG` is not set.
    pub filter: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("CURATOR_ENV").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("catalog.path", "data/catalog.json")?
            .set_default("catalog.persist", true)?
            .set_default("push.root", "data/push")?
            .set_default("log.filter", "info")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CURATOR").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_files() {
        let settings = Settings::new().expect("defaults must deserialize");
        assert!(settings.catalog.persist);
        assert_eq!(settings.push.root, PathBuf::from("data/push"));
        assert!(!settings.log.filter.is_empty());
    }
}
