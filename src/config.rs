use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::MarketKind;

pub const DEFAULT_BASE_URL: &str = "https://api.the-odds-api.com/v4";
pub const DEFAULT_SPORT: &str = "basketball_nba";
pub const DEFAULT_BOOKMAKER: &str = "fanduel";
pub const DEFAULT_REGIONS: &str = "us";
pub const DEFAULT_MARKETS: [&str; 4] = ["h2h", "player_points", "player_rebounds", "player_assists"];
pub const DEFAULT_OUTPUT_PATH: &str = "nba_data.json";

/// Fallback variable for the API key, shared with other Odds API tooling
pub const API_KEY_ENV_FALLBACK: &str = "THE_ODDS_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub odds_api: OddsApiConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OddsApiConfig {
    /// REST endpoint root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Sport key as the API names it (e.g., "basketball_nba")
    #[serde(default = "default_sport")]
    pub sport: String,
    #[serde(default = "default_regions")]
    pub regions: String,
    /// Market keys requested per event; leaving out "h2h" drops team odds
    #[serde(default = "default_markets")]
    pub markets: Vec<String>,
    /// The single sportsbook whose lines are kept
    #[serde(default = "default_bookmaker")]
    pub bookmaker: String,
    #[serde(default)]
    pub odds_format: OddsFormat,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_sport() -> String {
    DEFAULT_SPORT.to_string()
}

fn default_regions() -> String {
    DEFAULT_REGIONS.to_string()
}

fn default_markets() -> Vec<String> {
    DEFAULT_MARKETS.iter().map(|m| m.to_string()).collect()
}

fn default_bookmaker() -> String {
    DEFAULT_BOOKMAKER.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            sport: default_sport(),
            regions: default_regions(),
            markets: default_markets(),
            bookmaker: default_bookmaker(),
            odds_format: OddsFormat::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OddsApiConfig {
    /// Comma-joined market list as the `markets` query parameter expects it
    pub fn markets_param(&self) -> String {
        self.markets.join(",")
    }

    /// Team head-to-head prices are only collected when "h2h" is requested
    pub fn includes_team_odds(&self) -> bool {
        self.markets
            .iter()
            .any(|m| MarketKind::from_key(m) == MarketKind::HeadToHead)
    }
}

/// Price format requested from the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    #[default]
    Decimal,
    American,
}

impl OddsFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OddsFormat::Decimal => "decimal",
            OddsFormat::American => "american",
        }
    }
}

impl std::fmt::Display for OddsFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// JSON file overwritten on every run
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for daily-rolling log files; console only when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            odds_api: OddsApiConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific directory, optionally forcing the output path
    pub fn load_from<P: AsRef<Path>>(
        config_dir: P,
        output_override: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("odds_api.markets", DEFAULT_MARKETS.to_vec())?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("ODDS_SYNC_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (ODDS_SYNC__ODDS_API__API_KEY, etc.)
            .add_source(
                Environment::with_prefix("ODDS_SYNC")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("odds_api.markets")
                    .try_parsing(true),
            )
            .set_override_option(
                "output.path",
                output_override.map(|p| p.to_string_lossy().into_owned()),
            )?;

        let mut cfg: AppConfig = builder.build()?.try_deserialize()?;

        if cfg.odds_api.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV_FALLBACK) {
                cfg.odds_api.api_key = key.trim().to_string();
            }
        }

        Ok(cfg)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let api = &self.odds_api;

        if api.api_key.trim().is_empty() {
            errors.push(format!(
                "odds_api.api_key is empty (set ODDS_SYNC__ODDS_API__API_KEY or {API_KEY_ENV_FALLBACK})"
            ));
        }

        if !api.base_url.starts_with("http://") && !api.base_url.starts_with("https://") {
            errors.push(format!("odds_api.base_url is not an http(s) URL: {}", api.base_url));
        }

        if api.sport.trim().is_empty() {
            errors.push("odds_api.sport must not be empty".to_string());
        }

        if api.bookmaker.trim().is_empty() {
            errors.push("odds_api.bookmaker must not be empty".to_string());
        }

        if api.markets.iter().all(|m| m.trim().is_empty()) {
            errors.push("odds_api.markets must name at least one market".to_string());
        }

        if api.timeout_secs == 0 {
            errors.push("odds_api.timeout_secs must be positive".to_string());
        }

        if self.output.path.as_os_str().is_empty() {
            errors.push("output.path must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
