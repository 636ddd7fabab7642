//! INI file configuration adapter.
//!
//! Sections: `[provider]` (base_url, timeout_secs, max_retries, backoff_ms),
//! `[indicator]` (window), `[chart]` (price_panel_fraction).

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// Empty configuration; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[provider]
base_url = https://stooq.com/q/d/l/
timeout_secs = 10
max_retries = 2
backoff_ms = 50

[indicator]
window = 20

[chart]
price_panel_fraction = 0.6
"#;

    #[test]
    fn from_string_parses_all_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("provider", "base_url"),
            Some("https://stooq.com/q/d/l/".to_string())
        );
        assert_eq!(adapter.get_int("provider", "timeout_secs", 30), 10);
        assert_eq!(adapter.get_int("provider", "max_retries", 0), 2);
        assert_eq!(adapter.get_int("indicator", "window", 0), 20);
        assert_eq!(adapter.get_double("chart", "price_panel_fraction", 0.5), 0.6);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("provider", "base_url"), None);
        assert_eq!(adapter.get_int("indicator", "window", 20), 20);
        assert_eq!(adapter.get_double("chart", "price_panel_fraction", 0.6), 0.6);
        assert!(adapter.get_bool("provider", "verbose", true));
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[indicator]\nwindow = twenty\n").unwrap();
        assert_eq!(adapter.get_int("indicator", "window", 20), 20);
    }

    #[test]
    fn bool_parsing_variants() {
        let adapter =
            FileConfigAdapter::from_string("[a]\nx = yes\ny = 0\nz = maybe\n").unwrap();
        assert!(adapter.get_bool("a", "x", false));
        assert!(!adapter.get_bool("a", "y", true));
        assert!(adapter.get_bool("a", "z", true));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("provider", "backoff_ms", 0), 50);
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/marketlens.ini");
        assert!(result.is_err());
    }
}
