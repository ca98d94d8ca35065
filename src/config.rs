use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Tuning for the search coordinator.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Results per page for every fetch the coordinator issues.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Quiescent interval for free-text query debouncing, in milliseconds,
    /// measured from the last keystroke.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_page_size() -> usize {
    12
}
fn default_debounce_ms() -> u64 {
    300
}

/// Weights for the related-product scorer.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    #[serde(default = "default_category_weight")]
    pub category_weight: f64,
    #[serde(default = "default_subcategory_weight")]
    pub subcategory_weight: f64,
    #[serde(default = "default_tag_weight")]
    pub tag_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            category_weight: default_category_weight(),
            subcategory_weight: default_subcategory_weight(),
            tag_weight: default_tag_weight(),
        }
    }
}

fn default_category_weight() -> f64 {
    3.0
}
fn default_subcategory_weight() -> f64 {
    2.0
}
fn default_tag_weight() -> f64 {
    1.0
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.search.page_size == 0 {
        anyhow::bail!("search.page_size must be >= 1");
    }

    if config.search.debounce_ms > 10_000 {
        anyhow::bail!("search.debounce_ms must be <= 10000");
    }

    for (name, weight) in [
        ("category_weight", config.scoring.category_weight),
        ("subcategory_weight", config.scoring.subcategory_weight),
        ("tag_weight", config.scoring.tag_weight),
    ] {
        if !weight.is_finite() || weight < 0.0 {
            anyhow::bail!("scoring.{} must be a finite value >= 0", name);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_defaults_from_empty_file() {
        let f = write_config("");
        let config = load_config(f.path()).unwrap();
        assert_eq!(config.search.page_size, 12);
        assert_eq!(config.search.debounce_ms, 300);
        assert!((config.scoring.category_weight - 3.0).abs() < f64::EPSILON);
        assert!((config.scoring.subcategory_weight - 2.0).abs() < f64::EPSILON);
        assert!((config.scoring.tag_weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_explicit_values() {
        let f = write_config(
            r#"
[search]
page_size = 24
debounce_ms = 150

[scoring]
category_weight = 5.0
"#,
        );
        let config = load_config(f.path()).unwrap();
        assert_eq!(config.search.page_size, 24);
        assert_eq!(config.search.debounce_ms, 150);
        assert!((config.scoring.category_weight - 5.0).abs() < f64::EPSILON);
        // Unset scoring fields still default
        assert!((config.scoring.tag_weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let f = write_config("[search]\npage_size = 0\n");
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let f = write_config("[scoring]\ntag_weight = -1.0\n");
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(load_config(Path::new("/nonexistent/catalog.toml")).is_err());
    }
}
