//! Obstacles and the stream that spawns, scrolls and retires them

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

/// A top/bottom pipe pair with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Y where the gap opens (bottom of the top segment)
    pub gap_top: f32,
    pub gap_height: f32,
    pub width: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32, gap_height: f32, width: f32) -> Self {
        Self {
            x,
            gap_top,
            gap_height,
            width,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Segment hanging from the ceiling down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top)
    }

    /// Segment rising from the gap. Its height runs past the floor; only the
    /// part above the floor is ever reachable.
    pub fn bottom_rect(&self, world_height: f32) -> Rect {
        Rect::new(self.x, self.gap_bottom(), self.width, world_height)
    }
}

/// Live obstacles in spawn order (which is also left-to-right order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    spawn_x: f32,
    width: f32,
    gap_height: f32,
    min_gap_top: f32,
    max_gap_top: f32,
}

impl ObstacleStream {
    /// Empty stream with spawn geometry from a validated config
    pub fn new(config: &GameConfig) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_x: config.spawn_x(),
            width: config.obstacle_width,
            gap_height: config.gap_height,
            min_gap_top: config.min_gap_top,
            max_gap_top: config.max_gap_top(),
        }
    }

    /// A new obstacle at the spawn line if strictly more than `interval_ms`
    /// has elapsed since the last spawn. The caller decides whether to push
    /// it and records `now_ms` as the new spawn time.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &self,
        now_ms: f64,
        last_spawn_ms: f64,
        interval_ms: f64,
        rng: &mut R,
    ) -> Option<Obstacle> {
        if now_ms - last_spawn_ms <= interval_ms {
            return None;
        }
        let gap_top = rng.random_range(self.min_gap_top..=self.max_gap_top);
        Some(Obstacle::new(self.spawn_x, gap_top, self.gap_height, self.width))
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Scroll every obstacle left by `speed`
    pub fn advance_all(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Remove and return obstacles that have scrolled past `left_bound`
    pub fn retire_offscreen(&mut self, left_bound: f32) -> Vec<Obstacle> {
        let mut retired = Vec::new();
        self.obstacles.retain(|o| {
            if o.x < left_bound {
                retired.push(o.clone());
                false
            } else {
                true
            }
        });
        retired
    }

    /// Mark obstacles whose right edge is left of `actor_left` as passed.
    /// Returns how many were newly passed; each obstacle counts once.
    pub fn score_passed(&mut self, actor_left: f32) -> u32 {
        let mut count = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.right() < actor_left {
                obstacle.passed = true;
                count += 1;
            }
        }
        count
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObstacleStream {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn stream() -> ObstacleStream {
        ObstacleStream::new(&GameConfig::default())
    }

    proptest! {
        #[test]
        fn spawned_gap_stays_in_bounds(seed in any::<u64>()) {
            let config = GameConfig::default();
            let stream = ObstacleStream::new(&config);
            let mut rng = Pcg32::seed_from_u64(seed);
            let o = stream
                .maybe_spawn(2000.0, 0.0, config.spawn_interval_ms, &mut rng)
                .unwrap();
            prop_assert!(o.gap_top >= config.min_gap_top);
            prop_assert!(
                o.gap_top + o.gap_height
                    <= config.world_height - config.floor_height - config.floor_clearance
            );
        }
    }

    #[test]
    fn test_spawn_requires_strictly_more_than_interval() {
        let s = stream();
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(s.maybe_spawn(1500.0, 0.0, 1500.0, &mut rng).is_none());
        assert!(s.maybe_spawn(1000.0, 0.0, 1500.0, &mut rng).is_none());
        let o = s.maybe_spawn(1500.5, 0.0, 1500.0, &mut rng).unwrap();
        assert_eq!(o.x, 500.0);
        assert!(!o.passed);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let s = stream();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            let oa = s.maybe_spawn(2000.0, 0.0, 1500.0, &mut a).unwrap();
            let ob = s.maybe_spawn(2000.0, 0.0, 1500.0, &mut b).unwrap();
            assert_eq!(oa, ob);
        }
    }

    #[test]
    fn test_advance_and_retire() {
        let mut s = stream();
        s.push(Obstacle::new(500.0, 220.0, 150.0, 60.0));
        for _ in 0..50 {
            s.advance_all(3.0);
        }
        assert_eq!(s.as_slice()[0].x, 350.0);
        assert!(s.retire_offscreen(-100.0).is_empty());

        // 350 -> -100 takes 150 ticks; one more crosses the bound
        for _ in 0..150 {
            s.advance_all(3.0);
        }
        assert_eq!(s.as_slice()[0].x, -100.0);
        assert!(s.retire_offscreen(-100.0).is_empty());

        s.advance_all(3.0);
        let retired = s.retire_offscreen(-100.0);
        assert_eq!(retired.len(), 1);
        assert!(s.is_empty());
    }

    #[test]
    fn test_retire_keeps_order() {
        let mut s = stream();
        s.push(Obstacle::new(-150.0, 220.0, 150.0, 60.0));
        s.push(Obstacle::new(100.0, 230.0, 150.0, 60.0));
        s.push(Obstacle::new(300.0, 240.0, 150.0, 60.0));
        s.retire_offscreen(-100.0);
        let xs: Vec<f32> = s.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![100.0, 300.0]);
    }

    #[test]
    fn test_score_passed_counts_once() {
        let mut s = stream();
        s.push(Obstacle::new(10.0, 220.0, 150.0, 60.0));
        s.push(Obstacle::new(200.0, 220.0, 150.0, 60.0));

        // Actor left edge at 83: first obstacle's right edge (70) is behind it
        assert_eq!(s.score_passed(83.0), 1);
        assert_eq!(s.score_passed(83.0), 0);
        assert_eq!(s.score_passed(83.0), 0);
        assert!(s.as_slice()[0].passed);
        assert!(!s.as_slice()[1].passed);
    }

    #[test]
    fn test_score_needs_right_edge_strictly_behind() {
        let mut s = stream();
        s.push(Obstacle::new(23.0, 220.0, 150.0, 60.0));
        assert_eq!(s.score_passed(83.0), 0);
        s.advance_all(0.5);
        assert_eq!(s.score_passed(83.0), 1);
    }

    #[test]
    fn test_segments() {
        let o = Obstacle::new(100.0, 220.0, 150.0, 60.0);
        assert_eq!(o.top_rect(), Rect::new(100.0, 0.0, 60.0, 220.0));
        assert_eq!(o.bottom_rect(600.0), Rect::new(100.0, 370.0, 60.0, 600.0));
    }
}
