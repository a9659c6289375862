//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (simulated clock, never the wall clock)
//! - Injected, seedable RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use autopilot::autopilot_wants_flap;
pub use collision::{check_collision, check_obstacles, check_world_bounds};
pub use obstacle::{Obstacle, ObstacleStream};
pub use rect::Rect;
pub use state::{GameEvent, GameSession, SessionPhase};
pub use tick::{SimInput, apply_input, tick};
