use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub lookup: LookupConfig,
    pub filters: FiltersConfig,
    pub monthly: MonthlyConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Flight/location/booking backend.
#[derive(Debug, Deserialize, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 { 10 }

/// Seed values for a fresh result view.
#[derive(Debug, Deserialize, Clone)]
pub struct FiltersConfig {
    pub default_price_min: f64,
    pub default_price_max: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonthlyConfig {
    /// How many fares the "least by month" view lists when the client
    /// does not ask for a specific number.
    pub default_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionsConfig {
    /// A results view untouched for this long is evicted.
    #[serde(default = "default_idle_seconds")]
    pub idle_seconds: u64,
    #[serde(default = "default_sweep_seconds")]
    pub sweep_seconds: u64,
}

fn default_idle_seconds() -> u64 { 1800 }

fn default_sweep_seconds() -> u64 { 60 }

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_seconds: default_idle_seconds(),
            sweep_seconds: default_sweep_seconds(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local, untracked overrides
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYFARE_LOOKUP__BASE_URL=http://backend:3005`
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a single TOML document, without the file and env layers.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
