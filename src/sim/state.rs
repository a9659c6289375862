//! Game session state
//!
//! One `GameSession` owns every piece of mutable game state: the actor, the
//! obstacle stream, the score pair, the simulated clock and the random
//! source. It is reused across runs; only `start` resets it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::ObstacleStream;
use crate::config::GameConfig;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Before the first run or after a crash; world frozen, waiting for input
    #[default]
    Idle,
    /// Simulation running
    Active,
}

/// Something worth reacting to that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new obstacle entered at the spawn line
    Spawned,
    /// The actor cleared `count` obstacles this tick
    Scored { count: u32 },
    /// The run ended
    GameOver {
        score: u32,
        high_score: u32,
        new_record: bool,
    },
}

/// All mutable game state, generic over the random source used for gap
/// placement
#[derive(Debug, Clone)]
pub struct GameSession<R = Pcg32> {
    pub config: GameConfig,
    pub phase: SessionPhase,
    pub actor: Actor,
    pub obstacles: ObstacleStream,
    pub score: u32,
    pub high_score: u32,
    /// Ticks simulated in the current run. This is the simulated clock;
    /// milliseconds are derived from it, never accumulated.
    pub ticks: u64,
    /// Tick of the last spawn (run start counts as one)
    pub last_spawn_tick: u64,
    /// Runs started since the session was created
    pub runs: u32,
    pub(crate) rng: R,
}

impl GameSession<Pcg32> {
    /// Session with the default PCG source seeded from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Session with an injected random source. `config` must be validated.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let actor = Actor::new(
            config.actor_start(),
            config.actor_width,
            config.actor_height,
        );
        let obstacles = ObstacleStream::new(&config);
        Self {
            config,
            phase: SessionPhase::Idle,
            actor,
            obstacles,
            score: 0,
            high_score: 0,
            ticks: 0,
            last_spawn_tick: 0,
            runs: 0,
            rng,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Begin a run: actor to centre at rest, no obstacles, score zero.
    /// The high score is untouched.
    pub fn start(&mut self) {
        self.actor.reset(self.config.actor_start());
        self.obstacles.clear();
        self.score = 0;
        self.ticks = 0;
        self.last_spawn_tick = 0;
        self.runs += 1;
        self.phase = SessionPhase::Active;
        log::info!("Run {} started (high score {})", self.runs, self.high_score);
    }

    /// Flap while a run is active; ignored otherwise
    pub fn flap(&mut self) {
        if self.is_active() {
            self.actor.flap(self.config.flap_impulse);
        }
    }

    /// Active -> Idle. Returns the game-over event.
    pub(crate) fn end_run(&mut self) -> GameEvent {
        self.phase = SessionPhase::Idle;
        let new_record = self.score > self.high_score;
        if new_record {
            self.high_score = self.score;
        }
        log::info!(
            "Game over after {} ticks: score {}, high score {}{}",
            self.ticks,
            self.score,
            self.high_score,
            if new_record { " (new record)" } else { "" }
        );
        GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
            new_record,
        }
    }

    /// Simulated milliseconds since the current run started
    pub fn clock_ms(&self) -> f64 {
        self.config.ticks_to_ms(self.ticks)
    }

    /// Simulated time of the last spawn
    pub fn last_spawn_ms(&self) -> f64 {
        self.config.ticks_to_ms(self.last_spawn_tick)
    }

    /// Simulated milliseconds since the last spawn, exact for whole ticks
    pub fn since_spawn_ms(&self) -> f64 {
        self.config.ticks_to_ms(self.ticks - self.last_spawn_tick)
    }

    /// Display rotation of the actor in degrees
    pub fn actor_rotation(&self) -> f32 {
        self.actor.display_rotation(
            self.config.rotation_factor,
            self.config.rotation_min,
            self.config.rotation_max,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(GameConfig::default(), 1);
        assert_eq!(session.phase, SessionPhase::Idle);
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 0);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.actor.pos, Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_start_resets_run_state() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.start();
        session.actor.velocity = 5.0;
        session.actor.pos.y = 40.0;
        session.score = 3;
        session.ticks = 54;
        session.last_spawn_tick = 50;
        session
            .obstacles
            .push(super::super::Obstacle::new(200.0, 220.0, 150.0, 60.0));

        session.phase = SessionPhase::Idle;
        session.start();
        assert!(session.is_active());
        assert_eq!(session.score, 0);
        assert_eq!(session.clock_ms(), 0.0);
        assert_eq!(session.last_spawn_tick, 0);
        assert_eq!(session.actor.velocity, 0.0);
        assert_eq!(session.actor.pos.y, 300.0);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.runs, 2);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.score = 7;
        session.high_score = 5;
        session.start();
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 5);
    }

    #[test]
    fn test_end_run_updates_high_score_only_when_beaten() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.start();
        session.score = 12;
        session.high_score = 5;
        let event = session.end_run();
        assert_eq!(session.phase, SessionPhase::Idle);
        assert_eq!(session.high_score, 12);
        assert_eq!(
            event,
            GameEvent::GameOver {
                score: 12,
                high_score: 12,
                new_record: true
            }
        );

        session.start();
        session.score = 4;
        let event = session.end_run();
        assert_eq!(session.high_score, 12);
        assert!(matches!(event, GameEvent::GameOver { new_record: false, .. }));
    }

    #[test]
    fn test_flap_ignored_when_idle() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.flap();
        assert_eq!(session.actor.velocity, 0.0);
        session.start();
        session.flap();
        assert_eq!(session.actor.velocity, -8.0);
    }
}
