//! Runtime configuration for identity resolution and aggregation.
//!
//! Defines the YAML-serializable settings the parsing core needs from its
//! caller. Every field has a default, so an empty document is valid.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! domain_suffix: example.com
//! aggregation:
//!   connected_status: connected
//!   excluded_name_prefixes: [po, lo, vlan, nve]
//!   excluded_speed_substring: auto
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default organizational domain appended to bare device names.
pub const DEFAULT_DOMAIN_SUFFIX: &str = "example.com";

/// Filters applied by the aggregation engine before counting.
///
/// # Examples
///
/// ```
/// # use netscrape_core::AggregationConfig;
/// let agg = AggregationConfig::default();
/// assert!(agg.is_excluded_name("Po12"));
/// assert!(agg.is_excluded_name("  VLAN100"));
/// assert!(!agg.is_excluded_name("Gi1/0/1"));
/// assert!(agg.is_excluded_speed("a-Auto"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Status literal a row must carry (compared case-insensitively).
    pub connected_status: String,
    /// Lower-case name prefixes of virtual or aggregate interfaces.
    pub excluded_name_prefixes: Vec<String>,
    /// Lower-case substring marking a not-yet-negotiated speed.
    pub excluded_speed_substring: String,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            connected_status: "connected".to_string(),
            excluded_name_prefixes: ["po", "lo", "vlan", "nve"]
                .into_iter()
                .map(String::from)
                .collect(),
            excluded_speed_substring: "auto".to_string(),
        }
    }
}

impl AggregationConfig {
    /// Returns `true` if `status` matches the connected literal, ignoring case.
    pub fn is_connected(&self, status: &str) -> bool {
        status.to_lowercase() == self.connected_status.to_lowercase()
    }

    /// Returns `true` if the trimmed, lower-cased name starts with an excluded prefix.
    pub fn is_excluded_name(&self, name: &str) -> bool {
        let lower = name.trim().to_lowercase();
        self.excluded_name_prefixes
            .iter()
            .any(|prefix| lower.starts_with(prefix.to_lowercase().as_str()))
    }

    /// Returns `true` if the trimmed, lower-cased speed contains the excluded substring.
    pub fn is_excluded_speed(&self, speed: &str) -> bool {
        speed
            .trim()
            .to_lowercase()
            .contains(self.excluded_speed_substring.to_lowercase().as_str())
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use netscrape_core::NetscrapeConfig;
///
/// let config: NetscrapeConfig = serde_yaml::from_str("domain_suffix: .corp.example\n").unwrap();
/// assert_eq!(config.domain(), "corp.example");
/// assert_eq!(config.aggregation.excluded_speed_substring, "auto");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetscrapeConfig {
    /// Configuration format version.
    pub version: String,
    /// Organizational domain suffix, with or without a leading dot.
    pub domain_suffix: String,
    pub aggregation: AggregationConfig,
}

impl Default for NetscrapeConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
            aggregation: AggregationConfig::default(),
        }
    }
}

impl NetscrapeConfig {
    /// Loads configuration from a YAML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ConfigError::Io) if the file cannot be read,
    /// [`Yaml`](ConfigError::Yaml) if parsing fails, or
    /// [`Invalid`](ConfigError::Invalid) if a field is unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ConfigError::Io) if the file cannot be written, or
    /// [`Yaml`](ConfigError::Yaml) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> Result<()> {
        if self.domain().is_empty() {
            return Err(ConfigError::Invalid("domain_suffix cannot be empty".into()));
        }
        if self.aggregation.connected_status.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "aggregation.connected_status cannot be empty".into(),
            ));
        }
        if self
            .aggregation
            .excluded_name_prefixes
            .iter()
            .any(|prefix| prefix.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "aggregation.excluded_name_prefixes cannot contain empty entries".into(),
            ));
        }
        // An empty substring is contained in every speed and would exclude all rows.
        if self.aggregation.excluded_speed_substring.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "aggregation.excluded_speed_substring cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Domain suffix without a leading dot or surrounding whitespace.
    pub fn domain(&self) -> &str {
        self.domain_suffix.trim().trim_start_matches('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
domain_suffix: corp.example
aggregation:
  connected_status: Connected
  excluded_name_prefixes: [po, tun]
  excluded_speed_substring: auto
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: NetscrapeConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.domain(), "corp.example");
        assert_eq!(config.aggregation.excluded_name_prefixes, vec!["po", "tun"]);
        assert!(config.aggregation.is_connected("CONNECTED"));
        assert!(config.aggregation.is_excluded_name("Tunnel0"));
        assert!(!config.aggregation.is_excluded_name("Loopback0"));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: NetscrapeConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, NetscrapeConfig::default());
        assert_eq!(
            config.aggregation.excluded_name_prefixes,
            vec!["po", "lo", "vlan", "nve"]
        );
    }

    #[test]
    fn test_partial_aggregation_block_keeps_other_defaults() {
        let config: NetscrapeConfig =
            serde_yaml::from_str("aggregation:\n  excluded_speed_substring: unknown\n").unwrap();
        assert_eq!(config.aggregation.excluded_speed_substring, "unknown");
        assert_eq!(config.aggregation.connected_status, "connected");
    }

    #[test]
    fn test_status_match_is_not_trimmed() {
        let agg = AggregationConfig::default();
        assert!(agg.is_connected("Connected"));
        assert!(!agg.is_connected(" connected"));
        assert!(!agg.is_connected("notconnect"));
    }

    #[test]
    fn test_validate_rejects_empty_domain() {
        let config = NetscrapeConfig {
            domain_suffix: " . ".to_string(),
            ..NetscrapeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_blank_prefix() {
        let mut config = NetscrapeConfig::default();
        config.aggregation.excluded_name_prefixes.push(" ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_speed_substring() {
        for value in ["", "  "] {
            let yaml = format!("aggregation:\n  excluded_speed_substring: \"{value}\"\n");
            let config: NetscrapeConfig = serde_yaml::from_str(&yaml).unwrap();
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_load_rejects_blank_speed_substring() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netscrape.yml");
        std::fs::write(&path, "aggregation:\n  excluded_speed_substring: \"\"\n").unwrap();
        let err = NetscrapeConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("excluded_speed_substring"));
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netscrape.yml");

        let original: NetscrapeConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = NetscrapeConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = NetscrapeConfig::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
