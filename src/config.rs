use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_startups_table")]
    pub startups_table: String,
    #[serde(default = "default_investors_table")]
    pub investors_table: String,
}

fn default_startups_table() -> String { "startups".to_string() }
fn default_investors_table() -> String { "investors".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

impl MatchingSettings {
    /// Number of matches returned when the request names no limit
    pub fn default_limit(&self) -> usize {
        self.default_limit.unwrap_or(20) as usize
    }

    /// Hard cap on matches returned per request
    pub fn max_limit(&self) -> usize {
        self.max_limit.unwrap_or(100) as usize
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_industry_weight")]
    pub industry: u8,
    #[serde(default = "default_stage_weight")]
    pub stage: u8,
    #[serde(default = "default_business_model_weight")]
    pub business_model: u8,
    #[serde(default = "default_check_size_weight")]
    pub check_size: u8,
    #[serde(default = "default_geography_weight")]
    pub geography: u8,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            industry: default_industry_weight(),
            stage: default_stage_weight(),
            business_model: default_business_model_weight(),
            check_size: default_check_size_weight(),
            geography: default_geography_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(value: &WeightsConfig) -> Self {
        Self {
            industry: value.industry,
            stage: value.stage,
            business_model: value.business_model,
            check_size: value.check_size,
            geography: value.geography,
        }
    }
}

fn default_industry_weight() -> u8 { 30 }
fn default_stage_weight() -> u8 { 25 }
fn default_business_model_weight() -> u8 { 20 }
fn default_check_size_weight() -> u8 { 15 }
fn default_geography_weight() -> u8 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with VENTURE)
    /// 5. DATABASE_URL, SUPABASE_URL and SUPABASE_SERVICE_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., VENTURE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("VENTURE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_platform_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    ///
    /// Same layering as [`Settings::load`] with `path` in place of the
    /// `config/` files.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("VENTURE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_platform_env(settings)?.try_deserialize()
    }
}

/// Apply the conventional hosting-platform variables on top of the layered config
fn apply_platform_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    let overrides = [
        ("database.url", "DATABASE_URL"),
        ("supabase.url", "SUPABASE_URL"),
        ("supabase.api_key", "SUPABASE_SERVICE_KEY"),
    ];

    for (key, var) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
