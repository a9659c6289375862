//! Collision detection
//!
//! Everything is axis-aligned: the actor's bounding box against the ceiling,
//! the floor, and each obstacle's two segments. All checks are pure.

use super::obstacle::Obstacle;
use super::rect::Rect;
use crate::config::GameConfig;

/// Ceiling and floor are instant-death boundaries
#[inline]
pub fn check_world_bounds(actor: &Rect, world_top: f32, floor_top: f32) -> bool {
    actor.top() <= world_top || actor.bottom() >= floor_top
}

/// True if the actor touches any obstacle segment. Stops at the first hit.
pub fn check_obstacles<'a>(
    actor: &Rect,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    world_height: f32,
) -> bool {
    obstacles.into_iter().any(|o| {
        actor.intersects(&o.top_rect()) || actor.intersects(&o.bottom_rect(world_height))
    })
}

/// Full check for one tick: world bounds first, then obstacles
pub fn check_collision<'a>(
    actor: &Rect,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    config: &GameConfig,
) -> bool {
    check_world_bounds(actor, 0.0, config.floor_top())
        || check_obstacles(actor, obstacles, config.world_height)
}
