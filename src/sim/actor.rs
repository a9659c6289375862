//! The player actor (the bird)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Vertical-only body with a fixed horizontal position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Centre of the bounding box
    pub pos: Vec2,
    /// Vertical velocity per tick (positive = downward)
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
}

impl Actor {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos: center,
            velocity: 0.0,
            width,
            height,
        }
    }

    /// Back to `center` at rest (start of a run)
    pub fn reset(&mut self, center: Vec2) {
        self.pos = center;
        self.velocity = 0.0;
    }

    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.velocity += gravity;
    }

    /// Override the velocity with the flap impulse. No blending with the
    /// current velocity.
    #[inline]
    pub fn flap(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// Move by the current velocity. Bounds are the collision detector's job.
    #[inline]
    pub fn advance(&mut self) {
        self.pos.y += self.velocity;
    }

    /// Nose angle in degrees for drawing only
    pub fn display_rotation(&self, factor: f32, min: f32, max: f32) -> f32 {
        (self.velocity * factor).clamp(min, max)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn actor() -> Actor {
        Actor::new(Vec2::new(100.0, 300.0), 34.0, 24.0)
    }

    proptest! {
        #[test]
        fn gravity_grows_velocity_linearly(n in 0u32..500, gravity in 0.01f32..2.0) {
            let mut a = actor();
            for _ in 0..n {
                a.apply_gravity(gravity);
            }
            let expected = n as f32 * gravity;
            prop_assert!((a.velocity - expected).abs() <= expected.abs() * 1e-3 + 1e-4);
        }

        #[test]
        fn flap_overrides_any_velocity(prior in -100.0f32..100.0, impulse in -20.0f32..0.0) {
            let mut a = actor();
            a.velocity = prior;
            a.flap(impulse);
            prop_assert_eq!(a.velocity, impulse);
            a.flap(impulse);
            prop_assert_eq!(a.velocity, impulse);
        }
    }

    #[test]
    fn test_advance_moves_by_velocity_unclamped() {
        let mut a = actor();
        a.velocity = -400.0;
        a.advance();
        assert_eq!(a.pos.y, -100.0);
        assert_eq!(a.pos.x, 100.0);
    }

    #[test]
    fn test_display_rotation_clamps() {
        let mut a = actor();
        a.velocity = -8.0;
        assert_eq!(a.display_rotation(-3.0, -90.0, 30.0), 24.0);
        a.velocity = -20.0;
        assert_eq!(a.display_rotation(-3.0, -90.0, 30.0), 30.0);
        a.velocity = 40.0;
        assert_eq!(a.display_rotation(-3.0, -90.0, 30.0), -90.0);
    }

    #[test]
    fn test_reset() {
        let mut a = actor();
        a.velocity = 7.0;
        a.pos.y = 12.0;
        a.reset(Vec2::new(100.0, 300.0));
        assert_eq!(a.velocity, 0.0);
        assert_eq!(a.pos, Vec2::new(100.0, 300.0));
    }
}
