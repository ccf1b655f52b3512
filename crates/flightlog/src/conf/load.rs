//! Load: config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::ParserConfig;

pub const CONFIG_FILE_ENV: &str = "FLIGHTLOG_CONFIG_FILE";
pub const HEADER_THRESHOLD_ENV: &str = "FLIGHTLOG_HEADER_MATCH_THRESHOLD";
pub const MAX_LINE_BYTES_ENV: &str = "FLIGHTLOG_MAX_LINE_BYTES";

impl ParserConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if Path::new(&path).exists() => {
                tracing::info!("Loading parser configuration from: {}", path);
                Self::from_file(&path)?
            }
            Ok(path) => {
                tracing::info!("Config file not found at {}, using environment variables", path);
                Self::from_env()
            }
            Err(_) => Self::from_env(),
        };

        // Environment variables override file config
        if let Some(threshold) = env_parse(HEADER_THRESHOLD_ENV) {
            config.header_match_threshold = threshold;
        }
        if let Some(max) = env_parse(MAX_LINE_BYTES_ENV) {
            config.max_line_bytes = Some(max);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ParserConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            header_match_threshold: env_parse(HEADER_THRESHOLD_ENV)
                .unwrap_or(defaults.header_match_threshold),
            max_line_bytes: env_parse(MAX_LINE_BYTES_ENV).or(defaults.max_line_bytes),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
