//! Application configuration for WikiHarvest.
//!
//! User config lives at `~/.wikiharvest/wikiharvest.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WikiHarvestError};
use crate::types::SectionScoping;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "wikiharvest.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".wikiharvest";

// ---------------------------------------------------------------------------
// Config structs (matching wikiharvest.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Wiki API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Multi-page fetch behavior.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Squad extraction defaults.
    #[serde(default)]
    pub squads: SquadsConfig,
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// MediaWiki Action API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://en.wikipedia.org/w/api.php".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum concurrent page requests.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// Minimum ms between requests.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            rate_limit_ms: default_rate_limit(),
        }
    }
}

fn default_concurrency() -> u32 {
    4
}
fn default_rate_limit() -> u64 {
    250
}

/// `[squads]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadsConfig {
    /// Section title to extract rosters from.
    #[serde(default = "default_section")]
    pub section: String,

    /// How the section filter treats sub-headings.
    #[serde(default)]
    pub scoping: SectionScoping,

    /// First tournament year.
    #[serde(default = "default_from_year")]
    pub from_year: u16,

    /// Last tournament year (inclusive).
    #[serde(default = "default_to_year")]
    pub to_year: u16,

    /// Tournament years without a squad page worth fetching
    /// (wartime cancellations and withdrawals).
    #[serde(default = "default_skip_years")]
    pub skip_years: Vec<u16>,
}

impl Default for SquadsConfig {
    fn default() -> Self {
        Self {
            section: default_section(),
            scoping: SectionScoping::default(),
            from_year: default_from_year(),
            to_year: default_to_year(),
            skip_years: default_skip_years(),
        }
    }
}

fn default_section() -> String {
    "Argentina".into()
}
fn default_from_year() -> u16 {
    1930
}
fn default_to_year() -> u16 {
    2022
}
fn default_skip_years() -> Vec<u16> {
    vec![1938, 1942, 1946, 1950, 1954, 1970]
}

impl SquadsConfig {
    /// Expand the configured range into concrete tournament years:
    /// every fourth year from `from_year` through `to_year`, minus the
    /// skip list.
    pub fn years(&self) -> Vec<u16> {
        (self.from_year..=self.to_year)
            .step_by(4)
            .filter(|y| !self.skip_years.contains(y))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.wikiharvest/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WikiHarvestError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.wikiharvest/wikiharvest.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WikiHarvestError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| WikiHarvestError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| WikiHarvestError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| WikiHarvestError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| WikiHarvestError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
