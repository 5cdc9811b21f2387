//! User configuration: carousel tuning knobs and persistence.
//!
//! Knobs are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/arc-carousel/config.toml` (default
//! `~/.config/arc-carousel/config.toml`).  Every knob has a default; a
//! missing file, unknown keys and bad values all fall back to it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::momentum::Momentum;
use crate::core::projector::ArcParams;
use crate::core::snap::SnapAlignment;
use crate::core::wheel::WheelParams;

// ───────────────────────────────────────── errors ────────────

/// A configuration value that cannot be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{key}`: `{value}` is not a number")]
    NotANumber { key: String, value: String },
    #[error("`{key}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("copy count must be odd and at least 3, got {0}")]
    InvalidCopies(usize),
    #[error("unknown snap alignment `{0}` (expected `card` or `split`)")]
    UnknownAlignment(String),
}

// ───────────────────────────────────────── ranges ────────────

const RADIUS_RANGE: (f64, f64) = (0.5, 3.0);
const PERSPECTIVE_RANGE: (f64, f64) = (1.0, 5.0);
const PERSPECTIVE_FLOOR_RANGE: (f64, f64) = (0.0, 10_000.0);
const ROTATION_RANGE: (f64, f64) = (0.0, 1.0);
const LIFT_RANGE: (f64, f64) = (0.0, 0.5);
const DECAY_RANGE: (f64, f64) = (0.5, 0.99);
const REST_VELOCITY_RANGE: (f64, f64) = (0.01, 5.0);
const VELOCITY_LIMIT_RANGE: (f64, f64) = (0.25, 4.0);
const COPIES_MAX: usize = 99;
const SNAP_MS_RANGE: (f64, f64) = (0.0, 5_000.0);
const VISIBLE_RANGE: (f64, f64) = (1.0, 12.0);
const GAP_RANGE: (f64, f64) = (0.0, 400.0);
const WHEEL_PX_RANGE: (f64, f64) = (1.0, 1_000.0);
const NUDGE_RANGE: (f64, f64) = (0.0, 1.0);
const TAP_SLOP_RANGE: (f64, f64) = (0.0, 64.0);

fn number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::NotANumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// A number with no fractional part.
fn whole(key: &str, value: &str) -> Result<f64, ConfigError> {
    let n = number(key, value)?;
    if n.fract() == 0.0 {
        Ok(n)
    } else {
        Err(ConfigError::NotANumber {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn in_range(key: &str, value: f64, (min, max): (f64, f64)) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value,
            min,
            max,
        })
    }
}

fn copies(value: usize) -> Result<usize, ConfigError> {
    if value >= 3 && value % 2 == 1 && value <= COPIES_MAX {
        Ok(value)
    } else {
        Err(ConfigError::InvalidCopies(value))
    }
}

// ───────────────────────────────────────── config ────────────

/// Carousel configuration.  All knobs are inert tuning values.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub arc: ArcParams,
    pub alignment: SnapAlignment,
    pub momentum: Momentum,
    /// Velocity bound, in steps per tick.
    pub velocity_limit: f64,
    /// Duplicated copies of the item list (odd, `>= 3`).
    pub copies: usize,
    pub snap_duration: Duration,
    pub wheel: WheelParams,
    /// Frame length used to scale drag velocity to per-tick units.
    pub drag_frame_ms: f64,
    /// Maximum pointer travel (px) for a press/release to count as a click.
    pub tap_slop: f64,
    /// How many cards the host lays out across the viewport.
    pub visible_cards: usize,
    /// Gap between cards, in px.
    pub gap: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            arc: ArcParams::default(),
            alignment: SnapAlignment::default(),
            momentum: Momentum::default(),
            velocity_limit: 1.85,
            copies: 9,
            snap_duration: Duration::from_millis(340),
            wheel: WheelParams::default(),
            drag_frame_ms: crate::core::drag::DEFAULT_FRAME_MS,
            tap_slop: 6.0,
            visible_cards: 4,
            gap: 24.0,
        }
    }
}

impl CarouselConfig {
    /// Check every knob against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        in_range("radius_multiplier", self.arc.radius_multiplier, RADIUS_RANGE)?;
        in_range(
            "perspective_multiplier",
            self.arc.perspective_multiplier,
            PERSPECTIVE_RANGE,
        )?;
        in_range(
            "perspective_floor",
            self.arc.perspective_floor,
            PERSPECTIVE_FLOOR_RANGE,
        )?;
        in_range(
            "rotation_intensity",
            self.arc.rotation_intensity,
            ROTATION_RANGE,
        )?;
        in_range("lift", self.arc.lift, LIFT_RANGE)?;
        in_range("decay", self.momentum.decay, DECAY_RANGE)?;
        in_range(
            "rest_velocity",
            self.momentum.rest_velocity,
            REST_VELOCITY_RANGE,
        )?;
        in_range("velocity_limit", self.velocity_limit, VELOCITY_LIMIT_RANGE)?;
        copies(self.copies)?;
        in_range(
            "snap_ms",
            self.snap_duration.as_millis() as f64,
            SNAP_MS_RANGE,
        )?;
        in_range("visible_cards", self.visible_cards as f64, VISIBLE_RANGE)?;
        in_range("gap", self.gap, GAP_RANGE)?;
        in_range("wheel_px_per_card", self.wheel.px_per_card, WHEEL_PX_RANGE)?;
        in_range("wheel_nudge", self.wheel.nudge, NUDGE_RANGE)?;
        in_range("tap_slop", self.tap_slop, TAP_SLOP_RANGE)?;
        Ok(())
    }

    /// Apply one `key = value` pair.  Returns `Ok(false)` for unknown keys.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        match key {
            "radius_multiplier" => {
                self.arc.radius_multiplier = in_range(key, number(key, value)?, RADIUS_RANGE)?;
            }
            "perspective_multiplier" => {
                self.arc.perspective_multiplier =
                    in_range(key, number(key, value)?, PERSPECTIVE_RANGE)?;
            }
            "perspective_floor" => {
                self.arc.perspective_floor =
                    in_range(key, number(key, value)?, PERSPECTIVE_FLOOR_RANGE)?;
            }
            "rotation_intensity" => {
                self.arc.rotation_intensity = in_range(key, number(key, value)?, ROTATION_RANGE)?;
            }
            "lift" => {
                self.arc.lift = in_range(key, number(key, value)?, LIFT_RANGE)?;
            }
            "decay" => {
                self.momentum.decay = in_range(key, number(key, value)?, DECAY_RANGE)?;
            }
            "rest_velocity" => {
                self.momentum.rest_velocity =
                    in_range(key, number(key, value)?, REST_VELOCITY_RANGE)?;
            }
            "velocity_limit" => {
                self.velocity_limit = in_range(key, number(key, value)?, VELOCITY_LIMIT_RANGE)?;
            }
            "copies" => {
                let n = in_range(key, whole(key, value)?, (0.0, COPIES_MAX as f64))?;
                self.copies = copies(n as usize)?;
            }
            "snap_ms" => {
                let ms = in_range(key, number(key, value)?, SNAP_MS_RANGE)?;
                self.snap_duration = Duration::from_millis(ms as u64);
            }
            "alignment" => {
                self.alignment = value.trim_matches('"').parse()?;
            }
            "visible_cards" => {
                self.visible_cards = in_range(key, whole(key, value)?, VISIBLE_RANGE)? as usize;
            }
            "gap" => {
                self.gap = in_range(key, number(key, value)?, GAP_RANGE)?;
            }
            "wheel_px_per_card" => {
                self.wheel.px_per_card = in_range(key, number(key, value)?, WHEEL_PX_RANGE)?;
            }
            "wheel_nudge" => {
                self.wheel.nudge = in_range(key, number(key, value)?, NUDGE_RANGE)?;
            }
            "tap_slop" => {
                self.tap_slop = in_range(key, number(key, value)?, TAP_SLOP_RANGE)?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!("no config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to the default path.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    /// Parse the key-value format.  Bad lines are logged and skipped.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = lineno + 1, "config line without `=`: {line}");
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match config.apply(key, value) {
                Ok(true) => {}
                Ok(false) => tracing::debug!(line = lineno + 1, "ignoring unknown key `{key}`"),
                Err(err) => tracing::warn!(line = lineno + 1, "{err}; keeping default"),
            }
        }

        config
    }

    pub fn serialise(&self) -> String {
        let lines = [
            "# arc-carousel configuration".to_string(),
            String::new(),
            "# Arc shape".to_string(),
            format!("radius_multiplier = {}", self.arc.radius_multiplier),
            format!("perspective_multiplier = {}", self.arc.perspective_multiplier),
            format!("perspective_floor = {}", self.arc.perspective_floor),
            format!("rotation_intensity = {}", self.arc.rotation_intensity),
            format!("lift = {}", self.arc.lift),
            String::new(),
            "# Motion".to_string(),
            format!("decay = {}", self.momentum.decay),
            format!("rest_velocity = {}", self.momentum.rest_velocity),
            "# Velocity bound, in card steps per tick".to_string(),
            format!("velocity_limit = {}", self.velocity_limit),
            format!("snap_ms = {}", self.snap_duration.as_millis()),
            format!("wheel_px_per_card = {}", self.wheel.px_per_card),
            format!("wheel_nudge = {}", self.wheel.nudge),
            format!("tap_slop = {}", self.tap_slop),
            String::new(),
            "# Layout".to_string(),
            "# alignment: card (one centered card) or split (gap centered)".to_string(),
            format!("alignment = {}", self.alignment),
            format!("visible_cards = {}", self.visible_cards),
            format!("gap = {}", self.gap),
            "# Duplicated copies of the item list; odd, at least 3".to_string(),
            format!("copies = {}", self.copies),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/arc-carousel/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("arc-carousel").join("config.toml")
}
