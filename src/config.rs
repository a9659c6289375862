//! Game tuning
//!
//! Every physics and layout constant lives here so a run can be tuned
//! without a rebuild. Values are validated once at startup; the simulation
//! assumes a validated config and never re-checks geometry.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable game constants (world units are pixels, velocities are per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Simulation ticks per second
    pub target_fps: u32,

    // === Actor ===
    /// Velocity added every tick (positive = downward)
    pub gravity: f32,
    /// Velocity set on flap (negative = upward)
    pub flap_impulse: f32,
    /// Fixed horizontal centre of the actor
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    /// Display rotation in degrees per unit of velocity
    pub rotation_factor: f32,
    pub rotation_min: f32,
    pub rotation_max: f32,

    // === Obstacles ===
    /// Leftward scroll per tick
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    /// Simulated milliseconds between spawns
    pub spawn_interval_ms: f64,
    pub gap_height: f32,
    /// Lowest allowed gap top (distance from the ceiling)
    pub min_gap_top: f32,
    /// Space kept between the gap bottom and the floor
    pub floor_clearance: f32,
    /// Obstacles spawn this far beyond the right edge
    pub spawn_offset: f32,
    /// Obstacles with x below this are retired
    pub retire_x: f32,

    // === Floor ===
    pub floor_height: f32,
    /// Cosmetic floor scroll per frame
    pub floor_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 400.0,
            world_height: 600.0,
            target_fps: 60,

            gravity: 0.5,
            flap_impulse: -8.0,
            actor_x: 100.0,
            actor_width: 34.0,
            actor_height: 24.0,
            rotation_factor: -3.0,
            rotation_min: -90.0,
            rotation_max: 30.0,

            obstacle_speed: 3.0,
            obstacle_width: 60.0,
            spawn_interval_ms: 1500.0,
            gap_height: 150.0,
            min_gap_top: 200.0,
            floor_clearance: 100.0,
            spawn_offset: 100.0,
            retire_x: -100.0,

            floor_height: 100.0,
            floor_speed: 3.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject geometry the simulation can't honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("floor_height", self.floor_height),
            ("gravity", self.gravity),
            ("obstacle_speed", self.obstacle_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }
        let finite = [
            ("flap_impulse", self.flap_impulse),
            ("actor_x", self.actor_x),
            ("floor_speed", self.floor_speed),
            ("spawn_offset", self.spawn_offset),
            ("retire_x", self.retire_x),
            ("min_gap_top", self.min_gap_top),
            ("floor_clearance", self.floor_clearance),
            ("rotation_factor", self.rotation_factor),
            ("rotation_min", self.rotation_min),
            ("rotation_max", self.rotation_max),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, format!("must be finite, got {value}")));
            }
        }
        if self.flap_impulse >= 0.0 {
            return Err(ConfigError::invalid(
                "flap_impulse",
                format!("must be negative (upward), got {}", self.flap_impulse),
            ));
        }
        if self.floor_speed < 0.0 {
            return Err(ConfigError::invalid(
                "floor_speed",
                format!("must not be negative, got {}", self.floor_speed),
            ));
        }
        // Obstacles scroll left from the spawn line and must reach the retire line
        if self.retire_x >= self.spawn_x() {
            return Err(ConfigError::invalid(
                "retire_x",
                format!("{} is not left of the spawn line {}", self.retire_x, self.spawn_x()),
            ));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::invalid("target_fps", "must be > 0"));
        }
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::invalid(
                "spawn_interval_ms",
                format!("must be > 0, got {}", self.spawn_interval_ms),
            ));
        }
        if self.floor_height >= self.world_height {
            return Err(ConfigError::invalid(
                "floor_height",
                format!(
                    "{} leaves no room in a world {} high",
                    self.floor_height, self.world_height
                ),
            ));
        }
        if self.gap_height > self.floor_top() {
            return Err(ConfigError::invalid(
                "gap_height",
                format!(
                    "{} exceeds the {} units above the floor",
                    self.gap_height,
                    self.floor_top()
                ),
            ));
        }
        if self.min_gap_top < 0.0 || self.floor_clearance < 0.0 {
            return Err(ConfigError::invalid(
                "min_gap_top",
                "gap margins must not be negative",
            ));
        }
        if self.min_gap_top > self.max_gap_top() {
            return Err(ConfigError::invalid(
                "min_gap_top",
                format!(
                    "{} is above the highest gap top {} (gap {} + floor clearance {})",
                    self.min_gap_top,
                    self.max_gap_top(),
                    self.gap_height,
                    self.floor_clearance
                ),
            ));
        }
        if self.rotation_min > self.rotation_max {
            return Err(ConfigError::invalid(
                "rotation_min",
                format!("{} > rotation_max {}", self.rotation_min, self.rotation_max),
            ));
        }
        Ok(())
    }

    /// Length of one simulation tick in milliseconds
    pub fn tick_ms(&self) -> f64 {
        1000.0 / self.target_fps as f64
    }

    /// Simulated milliseconds covered by `ticks` whole ticks. Exact whenever
    /// the true value is a whole number of milliseconds.
    pub fn ticks_to_ms(&self, ticks: u64) -> f64 {
        ticks as f64 * 1000.0 / self.target_fps as f64
    }

    /// Y of the floor surface (instant-death boundary)
    pub fn floor_top(&self) -> f32 {
        self.world_height - self.floor_height
    }

    /// Highest value a gap top may take and still leave floor clearance
    pub fn max_gap_top(&self) -> f32 {
        self.floor_top() - self.floor_clearance - self.gap_height
    }

    /// X at which new obstacles appear
    pub fn spawn_x(&self) -> f32 {
        self.world_width + self.spawn_offset
    }

    /// Actor centre at the start of a run
    pub fn actor_start(&self) -> glam::Vec2 {
        glam::Vec2::new(self.actor_x, self.world_height / 2.0)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flappy_config";

    /// Load config from LocalStorage (WASM only), falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Load config from the file named by `FLAPPY_CONFIG`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os("FLAPPY_CONFIG") {
            Some(path) => {
                let config = Self::from_path(&path)?;
                log::info!("Loaded config from {}", path.to_string_lossy());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
