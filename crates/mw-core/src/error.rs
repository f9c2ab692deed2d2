//! Error types for grid access, configuration and generation

use thiserror::Error;

/// Errors raised by bounds-checked grid access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must be between 2x2 and {max}x{max}, got {width}x{height}", max = crate::Grid::MAX_SIDE)]
    InvalidDimensions { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("unknown map symbol {0:?}")]
    UnknownSymbol(char),
}

/// Errors raised while loading or validating a [`GeneratorConfig`](crate::GeneratorConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "map must be at least 3x3 to keep walkers off the border and at most {max} per side, got {width}x{height}",
        max = crate::Grid::MAX_SIDE
    )]
    InvalidDimensions { width: usize, height: usize },

    #[error("max_walkers must be at least 1")]
    NoWalkers,

    #[error("fill_percentage must be within (0, 1), got {0}")]
    FillPercentage(f32),

    #[error("change_probability must be within [0, 1], got {0}")]
    ChangeProbability(f32),

    #[error("fill target of {target} tiles exceeds the {reachable} tiles a mirrored walk can count")]
    FillUnreachable { target: usize, reachable: usize },

    #[error("could not read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("generation stalled after {ticks} ticks at {tile_count}/{target} tiles")]
    Stalled {
        ticks: u64,
        tile_count: usize,
        target: usize,
    },

    #[error("generation cancelled after {ticks} ticks")]
    Cancelled { ticks: u64 },
}
