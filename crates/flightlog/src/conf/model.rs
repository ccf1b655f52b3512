//! Model: ParserConfig.

use serde::{Deserialize, Serialize};

use crate::parser::{CANONICAL_COLUMN_COUNT, DEFAULT_HEADER_MATCH_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Positional canonical-name matches needed to treat the first content line as a header
    pub header_match_threshold: usize,
    /// Content lines longer than this (in bytes) are dropped. Unbounded when unset.
    pub max_line_bytes: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_match_threshold: DEFAULT_HEADER_MATCH_THRESHOLD,
            max_line_bytes: None,
        }
    }
}

impl ParserConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.header_match_threshold == 0 {
            return Err("header_match_threshold must be > 0".to_string());
        }
        if self.header_match_threshold > CANONICAL_COLUMN_COUNT {
            return Err(format!(
                "header_match_threshold must be <= {}",
                CANONICAL_COLUMN_COUNT
            ));
        }
        if self.max_line_bytes == Some(0) {
            return Err("max_line_bytes must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.header_match_threshold, 3);
        assert_eq!(config.max_line_bytes, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = ParserConfig { header_match_threshold: 0, ..Default::default() };
        assert!(zero.validate().is_err());

        let too_high = ParserConfig { header_match_threshold: 13, ..Default::default() };
        assert!(too_high.validate().unwrap_err().contains("<= 12"));

        let no_lines = ParserConfig { max_line_bytes: Some(0), ..Default::default() };
        assert!(no_lines.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ParserConfig = toml::from_str("header_match_threshold = 5").unwrap();
        assert_eq!(config.header_match_threshold, 5);
        assert_eq!(config.max_line_bytes, None);

        let limited: ParserConfig = toml::from_str("max_line_bytes = 2048").unwrap();
        assert_eq!(limited.max_line_bytes, Some(2048));
        assert_eq!(limited.header_match_threshold, 3);
    }
}
