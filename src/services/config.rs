use crate::cli::Cli;
use crate::domain::constants::{CONFIG_FILE, DEFAULT_ADB, DEFAULT_LOG_LEVEL, WHITELIST_FILE};
use crate::services::storage::app_dir;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub device: DeviceSection,
    #[serde(default)]
    pub whitelist: WhitelistSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct DeviceSection {
    #[serde(default)]
    pub adb: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WhitelistSection {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: Option<String>,
}

/// Effective settings after flags, env and config file are merged.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub adb: String,
    pub whitelist_path: PathBuf,
    pub log_level: String,
}

fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(app_dir()?.join(CONFIG_FILE))
}

pub fn load_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
}

/// Flag or env first, then the config file, then built-in defaults.
pub fn resolve(cli: &Cli) -> anyhow::Result<RuntimeConfig> {
    let file = match cli.config.as_deref() {
        Some(p) => load_config_file(Path::new(p))?,
        None => load_config_file(&default_config_path()?)?,
    };
    merge(cli, file)
}

pub fn merge(cli: &Cli, file: ConfigFile) -> anyhow::Result<RuntimeConfig> {
    let adb = cli
        .adb
        .clone()
        .or(file.device.adb)
        .unwrap_or_else(|| DEFAULT_ADB.to_string());
    let whitelist_path = match cli.whitelist.clone().or(file.whitelist.path) {
        Some(p) => PathBuf::from(p),
        None => app_dir()?.join(WHITELIST_FILE),
    };
    let log_level = file
        .logging
        .level
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    Ok(RuntimeConfig {
        adb,
        whitelist_path,
        log_level,
    })
}
