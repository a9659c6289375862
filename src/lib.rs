//! Flappy - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor, obstacles, collisions, session)
//! - `driver`: Fixed-rate frame loop shared by the web and native front ends
//! - `renderer`: Scene building and the WebGPU render pipeline
//! - `config`: Data-driven game tuning with startup validation
//! - `server`: Static host for the web build (native only)

pub mod config;
pub mod driver;
pub mod error;
pub mod renderer;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod sim;

pub use config::GameConfig;
pub use driver::{FrameStatus, Game, InputEvent};
pub use error::ConfigError;

/// Frame loop constants
pub mod consts {
    /// Longest frame delta fed to the accumulator (ms). Anything longer
    /// (tab switch, debugger pause) is dropped instead of replayed.
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 4;
    /// Clouds scroll one world unit every this many milliseconds
    pub const CLOUD_MS_PER_UNIT: f64 = 50.0;
}
