//! Configuration management

use pde_common::{PdeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Ingest Configuration Constants
// ============================================================================

/// Default input size limit (16 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Default accepted file extensions.
pub const DEFAULT_ALLOWED_EXTENSIONS: &str = "csv,tsv,xlsx,xls";

/// Default number of enriched rows echoed in a report.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Default prefix for the enriched output file.
pub const DEFAULT_OUTPUT_PREFIX: &str = "enriched_";

/// Ingest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    pub max_input_bytes: u64,

    /// Lower-case extensions without the leading dot
    pub allowed_extensions: Vec<String>,

    pub preview_rows: usize,
    pub output_prefix: String,

    /// Optional JSON rule file replacing the built-in rules
    pub rules_file: Option<PathBuf>,
}

impl IngestConfig {
    /// Load configuration from `.env`, the environment, and defaults
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = IngestConfig {
            max_input_bytes: std::env::var("PDE_MAX_INPUT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_INPUT_BYTES),
            allowed_extensions: parse_extensions(
                &std::env::var("PDE_ALLOWED_EXTENSIONS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.to_string()),
            ),
            preview_rows: std::env::var("PDE_PREVIEW_ROWS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PREVIEW_ROWS),
            output_prefix: std::env::var("PDE_OUTPUT_PREFIX")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_PREFIX.to_string()),
            rules_file: std::env::var("PDE_RULES_FILE").ok().map(PathBuf::from),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_input_bytes == 0 {
            return Err(PdeError::Config(
                "max_input_bytes must be greater than 0".to_string(),
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(PdeError::Config(
                "At least one file extension must be allowed".to_string(),
            ));
        }

        if self.preview_rows == 0 {
            return Err(PdeError::Config(
                "preview_rows must be greater than 0".to_string(),
            ));
        }

        // An empty prefix would make the output overwrite the input
        if self.output_prefix.is_empty() {
            return Err(PdeError::Config("output_prefix cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            allowed_extensions: parse_extensions(DEFAULT_ALLOWED_EXTENSIONS),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            rules_file: None,
        }
    }
}

fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = IngestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.allowed_extensions, vec!["csv", "tsv", "xlsx", "xls"]);
        assert_eq!(config.max_input_bytes, 16 * 1024 * 1024);
        assert_eq!(config.preview_rows, 10);
    }

    #[test]
    fn test_parse_extensions() {
        assert_eq!(parse_extensions(" .CSV, tsv ,,txt"), vec!["csv", "tsv", "txt"]);
        assert!(parse_extensions(" , ").is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = IngestConfig::default();
        config.allowed_extensions.clear();
        assert!(config.validate().is_err());

        let config = IngestConfig {
            output_prefix: String::new(),
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());

        let config = IngestConfig {
            max_input_bytes: 0,
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());

        let config = IngestConfig {
            preview_rows: 0,
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
