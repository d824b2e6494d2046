//! CLI configuration.

use anyhow::{Context, Result};
use emistore_commerce::listing::{CategoryFilter, DEFAULT_SWATCH_PREVIEW};
use emistore_data::CatalogConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["emistore.toml", ".emistore.toml", "emistore.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API connection.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Listing and detail display.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config content; JSON when the path ends in `.json`, TOML otherwise.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `EMISTORE_*` environment overrides.
    pub fn with_env(mut self) -> Result<Self> {
        self.catalog = self
            .catalog
            .with_env()
            .context("Invalid catalog configuration")?;
        Ok(self)
    }

    /// Problems that make the config unusable, and suspicious values.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(e) = self.catalog.validate() {
            errors.push(format!("catalog: {}", e));
        }
        if self.catalog.timeout_secs > 60 {
            warnings.push(format!(
                "catalog.timeout_secs = {} is unusually long",
                self.catalog.timeout_secs
            ));
        }
        if self.display.swatch_preview == 0 {
            errors.push("display.swatch_preview must be at least 1".to_string());
        }
        let category = CategoryFilter::from_value(&self.display.default_category);
        if !CategoryFilter::OPTIONS
            .iter()
            .any(|(value, _)| *value == category.value())
        {
            warnings.push(format!(
                "display.default_category '{}' is not one of the listing filters",
                self.display.default_category
            ));
        }

        (errors, warnings)
    }
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Colour swatches shown per product card.
    #[serde(default = "default_swatch_preview")]
    pub swatch_preview: usize,

    /// Category listed when `products` gets no filter.
    #[serde(default = "default_category")]
    pub default_category: String,
}

fn default_swatch_preview() -> usize {
    DEFAULT_SWATCH_PREVIEW
}

fn default_category() -> String {
    "all".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            swatch_preview: default_swatch_preview(),
            default_category: default_category(),
        }
    }
}

/// Generate a default emistore.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# emistore configuration

[catalog]
base_url = "{base_url}"
timeout_secs = {timeout}

[display]
swatch_preview = {swatches}
# "all" or a category such as "smartphones"
default_category = "all"
"#,
        base_url = emistore_data::DEFAULT_BASE_URL,
        timeout = emistore_data::DEFAULT_TIMEOUT_SECS,
        swatches = DEFAULT_SWATCH_PREVIEW,
    )
}
