//! Command-line overrides layered on top of a [`GeneratorConfig`]

use std::path::Path;

use mw_core::{ConfigError, GeneratorConfig};

/// Values given on the command line. `None` keeps the base config's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub max_walkers: Option<usize>,
    pub fill_percentage: Option<f32>,
    pub change_probability: Option<f32>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    /// Apply the overrides to `base`
    pub fn apply(&self, mut base: GeneratorConfig) -> GeneratorConfig {
        if let Some(width) = self.width {
            base.width = width;
        }
        if let Some(height) = self.height {
            base.height = height;
        }
        if let Some(max_walkers) = self.max_walkers {
            base.max_walkers = max_walkers;
        }
        if let Some(fill) = self.fill_percentage {
            base.fill_percentage = fill;
        }
        if let Some(change) = self.change_probability {
            base.change_probability = change;
        }
        if self.seed.is_some() {
            base.seed = self.seed;
        }
        base
    }

    /// Load `file` (or start from the defaults), apply the overrides and
    /// validate the result
    pub fn resolve(&self, file: Option<&Path>) -> Result<GeneratorConfig, ConfigError> {
        let base = match file {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }
}
