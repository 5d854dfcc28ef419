//! Layered configuration for default inputs and presets
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file,
//! then `ABW_`-prefixed environment variables using `__` for nesting
//! (`ABW_DEFAULTS__SAMPLE_RATE=96000`).

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calculator::{builtin_presets, compute_metrics, CalculatorInputs, Preset};

/// File stem looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "abw";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ABW";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Inputs used for any field not given on the command line
    pub defaults: CalculatorInputs,
    /// Preset buttons, replacing the built-in list when present
    pub presets: Vec<Preset>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: CalculatorInputs::default(),
            presets: builtin_presets(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path` (required when given) or from
    /// `abw.toml` in the working directory (optional), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                File::from(path).required(true)
            }
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.validate()?;
        debug!(
            "Configuration loaded: defaults={:?}, {} presets",
            config.defaults,
            config.presets.len()
        );

        Ok(config)
    }

    /// Checks that defaults and every preset are calculable
    pub fn validate(&self) -> Result<()> {
        compute_metrics(self.defaults).context("Invalid [defaults] in configuration")?;

        for preset in &self.presets {
            compute_metrics(preset.inputs())
                .with_context(|| format!("Invalid preset '{}' in configuration", preset.label))?;
        }

        Ok(())
    }
}
