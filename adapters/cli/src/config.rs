//! Session configuration loaded from an optional TOML file and command-line overrides.

use std::{fs, io, path::Path};

use grid_snake_core::GridSize;
use grid_snake_world::MIN_GRID_CELLS;
use serde::Deserialize;
use thiserror::Error;

/// Reasons a configuration cannot be used.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file")]
    Io(#[from] io::Error),
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// The grid cannot hold a snake and its food.
    #[error("a {width}x{height} grid needs at least {} cells", MIN_GRID_CELLS)]
    GridTooSmall {
        /// Configured column count.
        width: u32,
        /// Configured row count.
        height: u32,
    },
    /// Cells must have a positive pixel size.
    #[error("cell size must be a positive number of pixels (received {cell_size})")]
    InvalidCellSize {
        /// Configured cell size.
        cell_size: f32,
    },
}

/// Settings for a single play session.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Number of grid columns.
    pub(crate) grid_width: u32,
    /// Number of grid rows.
    pub(crate) grid_height: u32,
    /// Side length of a cell in pixels.
    pub(crate) cell_size: f32,
    /// Seed for food and obstacle placement; drawn randomly when absent.
    pub(crate) seed: Option<u64>,
    /// Whether presentation waits for vertical sync.
    pub(crate) vsync: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        let grid = GridSize::default();
        Self {
            grid_width: grid.width(),
            grid_height: grid.height(),
            cell_size: 20.0,
            seed: None,
            vsync: true,
        }
    }
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct ConfigOverrides {
    pub(crate) grid_width: Option<u32>,
    pub(crate) grid_height: Option<u32>,
    pub(crate) cell_size: Option<f32>,
    pub(crate) seed: Option<u64>,
    pub(crate) vsync: Option<bool>,
}

impl GameConfig {
    /// Reads and parses the TOML file at `path`.
    pub(crate) fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub(crate) fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces every field for which an override was supplied.
    #[must_use]
    pub(crate) fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            grid_width: overrides.grid_width.unwrap_or(self.grid_width),
            grid_height: overrides.grid_height.unwrap_or(self.grid_height),
            cell_size: overrides.cell_size.unwrap_or(self.cell_size),
            seed: overrides.seed.or(self.seed),
            vsync: overrides.vsync.unwrap_or(self.vsync),
        }
    }

    /// Rejects settings the game cannot be played with.
    pub(crate) fn validate(self) -> Result<Self, ConfigError> {
        if self.grid().cell_count() < MIN_GRID_CELLS {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize {
                cell_size: self.cell_size,
            });
        }
        Ok(self)
    }

    /// Grid described by the configured dimensions.
    #[must_use]
    pub(crate) const fn grid(&self) -> GridSize {
        GridSize::new(self.grid_width, self.grid_height)
    }
}
