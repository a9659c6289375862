//! Fixed timestep simulation tick
//!
//! Advances a session by exactly one tick. Tick length comes from the
//! config; nothing here reads a wall clock.

use rand::Rng;

use super::collision::check_collision;
use super::state::{GameEvent, GameSession, SessionPhase};

/// Player intent for the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimInput {
    /// Flap (key press, click or touch)
    Flap,
}

/// Apply one input. A flap while idle starts a new run and is consumed by
/// the restart: the new run begins at rest, without a flap.
pub fn apply_input<R: Rng>(session: &mut GameSession<R>, input: SimInput) {
    match (input, session.phase) {
        (SimInput::Flap, SessionPhase::Active) => session.flap(),
        (SimInput::Flap, SessionPhase::Idle) => session.start(),
    }
}

/// Advance the session by one tick. Idle sessions are frozen and produce
/// no events.
pub fn tick<R: Rng>(session: &mut GameSession<R>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != SessionPhase::Active {
        return events;
    }

    session.ticks += 1;

    // Actor
    session.actor.apply_gravity(session.config.gravity);
    session.actor.advance();

    // Spawn on the simulated clock, measured from the last spawn in whole
    // ticks so the interval comparison is exact
    if let Some(obstacle) = session.obstacles.maybe_spawn(
        session.since_spawn_ms(),
        0.0,
        session.config.spawn_interval_ms,
        &mut session.rng,
    ) {
        log::debug!(
            "Spawned obstacle at x={} gap_top={:.1} (t={:.0}ms)",
            obstacle.x,
            obstacle.gap_top,
            session.clock_ms()
        );
        session.obstacles.push(obstacle);
        session.last_spawn_tick = session.ticks;
        events.push(GameEvent::Spawned);
    }

    // Scroll, score, retire
    session.obstacles.advance_all(session.config.obstacle_speed);

    let passed = session.obstacles.score_passed(session.actor.rect().left());
    if passed > 0 {
        session.score += passed;
        events.push(GameEvent::Scored { count: passed });
    }

    let retired = session.obstacles.retire_offscreen(session.config.retire_x);
    if !retired.is_empty() {
        log::trace!("Retired {} obstacle(s)", retired.len());
    }

    // Collisions end the run with the world frozen as-is
    if check_collision(&session.actor.rect(), &session.obstacles, &session.config) {
        events.push(session.end_run());
    }

    events
}
