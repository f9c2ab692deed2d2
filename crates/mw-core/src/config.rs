//! Generation parameters
//!
//! A config is fixed for the length of a run. It can be built in code,
//! loaded from a JSON file, or overridden field by field from the command line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::map::Grid;

/// Parameters of a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    /// Upper bound on the walker population
    pub max_walkers: usize,
    /// Fraction of all cells to carve before stopping, in (0, 1)
    pub fill_percentage: f32,
    /// Change probability stamped onto every walker when it is created
    pub change_probability: f32,
    /// RNG seed. A fresh seed is drawn when absent.
    pub seed: Option<u64>,
    /// Consecutive ticks without a new floor cell before giving up.
    /// Defaults to `100 * width * height`.
    pub max_idle_ticks: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            max_walkers: 10,
            fill_percentage: 0.4,
            change_probability: 0.5,
            seed: None,
            max_idle_ticks: None,
        }
    }
}

impl GeneratorConfig {
    /// Config for a `width` x `height` map, other fields at their defaults
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a JSON config file. Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Cell count, saturating for sizes [`validate`](Self::validate) rejects
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Smallest tile count whose ratio to the area reaches `fill_percentage`.
    ///
    /// Computed with the same `f32` comparison the carving loop uses.
    pub fn target_tiles(&self) -> usize {
        let area = self.area();
        if area == 0 {
            return 0;
        }
        let mut n = (self.fill_percentage * area as f32).floor().max(0.0) as usize;
        while n < area && (n as f32 / area as f32) < self.fill_percentage {
            n += 1;
        }
        n
    }

    /// Highest tile count carving can ever reach.
    ///
    /// Walkers stay inside `[1, dim - 2]`, and each counted carve fills a cell
    /// together with its mirror, so only one tile per mirrored pair of interior
    /// columns can be counted.
    pub fn reachable_tiles(&self) -> usize {
        let inner_w = self.width.saturating_sub(2);
        let inner_h = self.height.saturating_sub(2);
        inner_w.div_ceil(2).saturating_mul(inner_h)
    }

    pub fn idle_tick_limit(&self) -> u64 {
        self.max_idle_ticks
            .unwrap_or_else(|| (self.area() as u64).saturating_mul(100))
            .max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sides = 3..=Grid::MAX_SIDE;
        if !sides.contains(&self.width)
            || !sides.contains(&self.height)
            || self.width.checked_mul(self.height).is_none()
        {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_walkers == 0 {
            return Err(ConfigError::NoWalkers);
        }
        if !(self.fill_percentage > 0.0 && self.fill_percentage < 1.0) {
            return Err(ConfigError::FillPercentage(self.fill_percentage));
        }
        if !(0.0..=1.0).contains(&self.change_probability) {
            return Err(ConfigError::ChangeProbability(self.change_probability));
        }

        let target = self.target_tiles();
        let reachable = self.reachable_tiles();
        if target > reachable {
            return Err(ConfigError::FillUnreachable { target, reachable });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_tiles(), 360);
        assert_eq!(config.reachable_tiles(), 14 * 28);
    }

    #[test]
    fn test_target_tiles() {
        let mut config = GeneratorConfig::with_size(10, 10);
        config.fill_percentage = 0.3;
        assert_eq!(config.target_tiles(), 30);

        config.fill_percentage = 0.305;
        assert_eq!(config.target_tiles(), 31);
    }

    #[test]
    fn test_reachable_tiles_odd_width() {
        // Interior columns 1..=5 form pairs (1,5), (2,4) and the center column 3
        let config = GeneratorConfig::with_size(7, 4);
        assert_eq!(config.reachable_tiles(), 3 * 2);
    }

    #[test]
    fn test_rejects_small_dimensions() {
        let config = GeneratorConfig::with_size(2, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { width: 2, height: 10 })
        ));
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        let config = GeneratorConfig::with_size(usize::MAX / 2, 4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { height: 4, .. })
        ));
        assert_eq!(config.area(), usize::MAX);
        assert_eq!(config.idle_tick_limit(), u64::MAX);

        let config = GeneratorConfig::from_json(&format!(r#"{{"width": {}, "height": 3}}"#, usize::MAX)).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let mut config = GeneratorConfig::default();
        config.max_walkers = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoWalkers)));

        let mut config = GeneratorConfig::default();
        config.fill_percentage = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::FillPercentage(_))));

        let mut config = GeneratorConfig::default();
        config.fill_percentage = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::FillPercentage(_))));

        let mut config = GeneratorConfig::default();
        config.change_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ChangeProbability(_))
        ));
    }

    #[test]
    fn test_rejects_unreachable_fill() {
        let mut config = GeneratorConfig::with_size(4, 4);
        config.fill_percentage = 0.4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FillUnreachable { target: 7, reachable: 2 })
        ));

        config.fill_percentage = 0.1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_partial_config() {
        let config = GeneratorConfig::from_json(r#"{"width": 12, "seed": 7}"#).unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_walkers, 10);
    }

    #[test]
    fn test_json_parse_error() {
        assert!(matches!(
            GeneratorConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeneratorConfig::load(Path::new("/nonexistent/mirrorwalk.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_idle_tick_limit() {
        let mut config = GeneratorConfig::with_size(10, 10);
        assert_eq!(config.idle_tick_limit(), 10_000);
        config.max_idle_ticks = Some(50);
        assert_eq!(config.idle_tick_limit(), 50);
    }
}
