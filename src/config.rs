//! User configuration loaded from a JSON file in the platform config dir.
//!
//! Every field is optional in the file. A missing file means defaults; a
//! broken one is logged and also falls back to defaults.

use crate::constants::{APP_NAME, CELL_HEIGHT, CELL_WIDTH, CONFIG_FILE_NAME, FRAME_INTERVAL_MS};
use crate::game::{Preset, StartPosition, Tuning};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Per-field overrides applied on top of the chosen preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningOverrides {
    pub scroll_step: Option<f64>,
    pub gravity: Option<f64>,
    pub jump_impulse: Option<f64>,
    pub obstacle_width: Option<f64>,
    pub obstacle_gap: Option<f64>,
    pub min_segment_height: Option<f64>,
    pub spawn_cadence: Option<u32>,
    pub actor_x: Option<f64>,
    pub actor_width: Option<f64>,
    pub actor_height: Option<f64>,
    pub ground_margin: Option<f64>,
    pub start_position: Option<StartPosition>,
    pub snap_on_collision: Option<bool>,
    pub strict_bounds: Option<bool>,
}

impl TuningOverrides {
    fn apply(&self, base: Tuning) -> Tuning {
        Tuning {
            scroll_step: self.scroll_step.unwrap_or(base.scroll_step),
            gravity: self.gravity.unwrap_or(base.gravity),
            jump_impulse: self.jump_impulse.unwrap_or(base.jump_impulse),
            obstacle_width: self.obstacle_width.unwrap_or(base.obstacle_width),
            obstacle_gap: self.obstacle_gap.unwrap_or(base.obstacle_gap),
            min_segment_height: self.min_segment_height.unwrap_or(base.min_segment_height),
            spawn_cadence: self.spawn_cadence.unwrap_or(base.spawn_cadence),
            actor_x: self.actor_x.unwrap_or(base.actor_x),
            actor_width: self.actor_width.unwrap_or(base.actor_width),
            actor_height: self.actor_height.unwrap_or(base.actor_height),
            ground_margin: self.ground_margin.unwrap_or(base.ground_margin),
            start_position: self.start_position.unwrap_or(base.start_position),
            snap_on_collision: self.snap_on_collision.unwrap_or(base.snap_on_collision),
            strict_bounds: self.strict_bounds.unwrap_or(base.strict_bounds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub preset: Preset,
    pub tuning: TuningOverrides,
    pub frame_interval_ms: u64,
    /// World units per terminal column.
    pub cell_width: f64,
    /// World units per terminal row.
    pub cell_height: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            tuning: TuningOverrides::default(),
            frame_interval_ms: FRAME_INTERVAL_MS,
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Preset constants with any overrides from the file applied.
    pub fn tuning(&self) -> Tuning {
        self.tuning.apply(self.preset.tuning())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {}", value),
                })
            }
        }
        fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a finite number, got {}", value),
                })
            }
        }
        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must not be negative, got {}", value),
                })
            }
        }

        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "frame_interval_ms",
                reason: "must be positive, got 0".to_string(),
            });
        }
        positive("cell_width", self.cell_width)?;
        positive("cell_height", self.cell_height)?;

        let tuning = self.tuning();
        if tuning.spawn_cadence == 0 {
            return Err(ConfigError::Invalid {
                field: "spawn_cadence",
                reason: "must be positive, got 0".to_string(),
            });
        }
        // Obstacles must move left or they are never dropped.
        positive("scroll_step", tuning.scroll_step)?;
        positive("obstacle_width", tuning.obstacle_width)?;
        positive("actor_width", tuning.actor_width)?;
        positive("actor_height", tuning.actor_height)?;
        non_negative("obstacle_gap", tuning.obstacle_gap)?;
        non_negative("min_segment_height", tuning.min_segment_height)?;
        finite("gravity", tuning.gravity)?;
        finite("jump_impulse", tuning.jump_impulse)?;
        finite("actor_x", tuning.actor_x)?;
        finite("ground_margin", tuning.ground_margin)?;
        if let StartPosition::Fixed(y) = tuning.start_position {
            finite("start_position", y)?;
        }
        Ok(())
    }

    /// Read and validate a config file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is missing or
    /// unusable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load_from_path(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    preset = config.preset.name(),
                    "config loaded"
                );
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    pub fn to_pretty_json(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

fn project_dirs() -> io::Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })
}

/// Location of the config file. Does not create anything.
pub fn config_path() -> io::Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

/// Directory for the log file, created if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
