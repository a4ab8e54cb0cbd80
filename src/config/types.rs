use serde::{Deserialize, Serialize};

use crate::agent::{AngleUnit, ColorScale, TurtleOptions};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub turtle: TurtleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Start-up settings for the headless turtle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurtleConfig {
    /// Color scale the turtle starts in: "fractional" (0..1) or "integer" (0..255).
    #[serde(default)]
    pub color_scale: ColorScale,
    /// Angle unit the turtle starts in: "degrees" or "radians".
    #[serde(default)]
    pub angle_unit: AngleUnit,
    /// Whether `sleep` actually blocks (default: true).
    #[serde(default = "default_pause")]
    pub pause: bool,
    /// Longest single pause in seconds (default: 60).
    #[serde(default = "default_max_pause_seconds")]
    pub max_pause_seconds: f64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "warn").
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_pause() -> bool {
    true
}

fn default_max_pause_seconds() -> f64 {
    60.0
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            color_scale: ColorScale::default(),
            angle_unit: AngleUnit::default(),
            pause: default_pause(),
            max_pause_seconds: default_max_pause_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl From<&TurtleConfig> for TurtleOptions {
    fn from(config: &TurtleConfig) -> Self {
        Self {
            color_scale: config.color_scale,
            angle_unit: config.angle_unit,
            pause: config.pause,
            max_pause_seconds: config.max_pause_seconds,
        }
    }
}
