use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{frame::ElementSizes, game_theme::GameTheme};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TABLE_PONG_CONFIG";
/// Environment variable naming the log file; wins over `log_file`.
pub const LOG_ENV: &str = "TABLE_PONG_LOG";
const DEFAULT_CONFIG_PATH: &str = "config/table-pong.toml";
const MIN_TICK_RATE_HZ: f64 = 1.0;
const MAX_TICK_RATE_HZ: f64 = 1000.0;

/// Host-side settings: frame rate, how big terminal cells are in surface
/// pixels, element sizes and presentation. Game rules are not configurable.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    pub tick_rate_hz: f64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub paddle_height_px: f64,
    pub paddle_width_px: f64,
    pub ball_radius_px: f64,
    /// Largest table, in terminal cells including the border.
    pub max_columns: u16,
    pub max_rows: u16,
    pub theme: GameTheme,
    /// Ring the terminal bell for sound effects.
    pub bell: bool,
    /// Where logs go. The terminal is the game surface, so without a file
    /// logs are discarded.
    pub log_file: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            paddle_height_px: 80.0,
            paddle_width_px: 16.0,
            ball_radius_px: 8.0,
            max_columns: 120,
            max_rows: 32,
            theme: GameTheme::Monokai,
            bell: false,
            log_file: None,
        }
    }
}

impl HostConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Log file to use: the `TABLE_PONG_LOG` value if set, else `log_file`.
    pub fn log_path(&self, env_value: Option<OsString>) -> Option<PathBuf> {
        env_value
            .map(PathBuf::from)
            .or_else(|| self.log_file.clone())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let cfg: Self = toml::from_str(content)?;
        Ok(cfg.sanitized())
    }

    /// Replace values that would make the host misbehave with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64, name: &str| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                tracing::warn!("{name} must be positive, got {value}; using {fallback}");
                fallback
            }
        };
        self.tick_rate_hz = positive(self.tick_rate_hz, defaults.tick_rate_hz, "tick_rate_hz");
        if !(MIN_TICK_RATE_HZ..=MAX_TICK_RATE_HZ).contains(&self.tick_rate_hz) {
            let clamped = self.tick_rate_hz.clamp(MIN_TICK_RATE_HZ, MAX_TICK_RATE_HZ);
            tracing::warn!(
                "tick_rate_hz {} is outside {MIN_TICK_RATE_HZ}..={MAX_TICK_RATE_HZ}; using {clamped}",
                self.tick_rate_hz
            );
            self.tick_rate_hz = clamped;
        }
        self.cell_width_px = positive(self.cell_width_px, defaults.cell_width_px, "cell_width_px");
        self.cell_height_px =
            positive(self.cell_height_px, defaults.cell_height_px, "cell_height_px");
        self.paddle_height_px = positive(
            self.paddle_height_px,
            defaults.paddle_height_px,
            "paddle_height_px",
        );
        self.paddle_width_px =
            positive(self.paddle_width_px, defaults.paddle_width_px, "paddle_width_px");
        self.ball_radius_px =
            positive(self.ball_radius_px, defaults.ball_radius_px, "ball_radius_px");
        if self.max_columns < 20 || self.max_rows < 8 {
            tracing::warn!(
                "table limit {}x{} is too small; using {}x{}",
                self.max_columns,
                self.max_rows,
                defaults.max_columns,
                defaults.max_rows
            );
            self.max_columns = defaults.max_columns;
            self.max_rows = defaults.max_rows;
        }
        self
    }

    pub fn element_sizes(&self) -> ElementSizes {
        ElementSizes {
            paddle_height: self.paddle_height_px,
            paddle_width: self.paddle_width_px,
            ball_radius: self.ball_radius_px,
        }
    }
}
