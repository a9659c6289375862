//! Frame loop driver
//!
//! Platform-independent half of the game loop. The platform layer feeds
//! input events and frame timestamps in; the driver turns them into fixed
//! simulation ticks, scrolls the backdrop and reports what happened.

use std::collections::VecDeque;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::consts::{CLOUD_MS_PER_UNIT, MAX_FRAME_MS, MAX_TICKS_PER_FRAME};
use crate::sim::{GameEvent, GameSession, SimInput, apply_input, autopilot_wants_flap, tick};

/// Input recognised by the loop. Platforms drop anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press, click or touch
    Flap,
    /// Stop the loop after the current iteration
    Quit,
    /// Hand control to the demo autopilot (or take it back)
    ToggleAutopilot,
}

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Quit,
}

/// Cosmetic scrolling that keeps moving even while the world is frozen
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    /// Floor texture offset, in (-world_width, 0]
    pub floor_offset: f32,
    /// Cloud band offset, in [0, 3 * world_width)
    pub cloud_offset: f32,
}

impl Backdrop {
    pub fn advance(&mut self, config: &GameConfig) {
        self.floor_offset -= config.floor_speed;
        if self.floor_offset <= -config.world_width {
            self.floor_offset = 0.0;
        }

        let band = config.world_width * 3.0;
        self.cloud_offset =
            (self.cloud_offset + (config.tick_ms() / CLOUD_MS_PER_UNIT) as f32) % band;
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    fn record(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Slot we are about to overwrite holds the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
    }
}

/// Game instance holding all loop state
#[derive(Debug, Clone)]
pub struct Game<R = Pcg32> {
    pub session: GameSession<R>,
    pub backdrop: Backdrop,
    /// Autopilot flaps for the player
    pub autopilot: bool,
    pending: VecDeque<InputEvent>,
    events: Vec<GameEvent>,
    accumulator: f64,
    last_time: Option<f64>,
    running: bool,
    fps: FpsCounter,
}

impl<R: Rng> Game<R> {
    pub fn new(session: GameSession<R>) -> Self {
        Self {
            session,
            backdrop: Backdrop::default(),
            autopilot: false,
            pending: VecDeque::new(),
            events: Vec::new(),
            accumulator: 0.0,
            last_time: None,
            running: true,
            fps: FpsCounter::new(),
        }
    }

    /// Queue an input for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps
    }

    /// Events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one loop iteration at timestamp `now_ms` (any monotonic clock).
    ///
    /// Inputs are applied first, then one tick per whole tick interval that
    /// has elapsed, capped at `MAX_TICKS_PER_FRAME`.
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if !self.running {
            return FrameStatus::Quit;
        }

        while let Some(event) = self.pending.pop_front() {
            match event {
                InputEvent::Quit => {
                    log::info!("Quit requested");
                    self.running = false;
                    self.pending.clear();
                    return FrameStatus::Quit;
                }
                InputEvent::Flap => apply_input(&mut self.session, SimInput::Flap),
                InputEvent::ToggleAutopilot => {
                    self.autopilot = !self.autopilot;
                    log::info!("Autopilot: {}", self.autopilot);
                }
            }
        }

        let tick_ms = self.session.config.tick_ms();
        let elapsed = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => tick_ms,
        };
        self.last_time = Some(now_ms);
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= tick_ms && ticks < MAX_TICKS_PER_FRAME {
            if self.autopilot && autopilot_wants_flap(&self.session) {
                apply_input(&mut self.session, SimInput::Flap);
            }
            self.events.extend(tick(&mut self.session));
            self.backdrop.advance(&self.session.config);
            self.accumulator -= tick_ms;
            ticks += 1;
        }

        self.fps.record(now_ms);
        FrameStatus::Running
    }
}

/// Drive `game` on this thread at the configured frame rate until it quits
/// or `max_frames` iterations have run. The frame-rate wait at the end of
/// each iteration is the only blocking call. Returns the frames run.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_headless<R: Rng>(game: &mut Game<R>, max_frames: u64) -> u64 {
    use std::time::{Duration, Instant};

    let frame_budget = Duration::from_secs_f64(game.session.config.tick_ms() / 1000.0);
    let start = Instant::now();
    let mut frames = 0;

    loop {
        let frame_start = Instant::now();
        if frames >= max_frames {
            game.push_input(InputEvent::Quit);
        }

        let status = game.frame(start.elapsed().as_secs_f64() * 1000.0);
        for event in game.take_events() {
            if let GameEvent::GameOver { new_record: true, score, .. } = event {
                log::info!("New high score: {}", score);
            }
        }
        if status == FrameStatus::Quit {
            break;
        }
        frames += 1;

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SessionPhase;

    const TICK: f64 = 1000.0 / 60.0;

    fn game() -> Game {
        Game::new(GameSession::new(GameConfig::default(), 7))
    }

    #[test]
    fn test_first_frame_runs_one_tick() {
        let mut g = game();
        g.push_input(InputEvent::Flap);
        assert_eq!(g.frame(1000.0), FrameStatus::Running);
        assert_eq!(g.session.phase, SessionPhase::Active);
        assert_eq!(g.session.ticks, 1);
    }

    #[test]
    fn test_ticks_follow_elapsed_time() {
        let mut g = game();
        g.push_input(InputEvent::Flap);
        g.frame(0.0);
        // Half a tick: nothing new
        g.frame(TICK * 0.5);
        assert_eq!(g.session.ticks, 1);
        // Another half: one more
        g.frame(TICK * 1.0 + 0.001);
        assert_eq!(g.session.ticks, 2);
        // Three ticks worth at once
        g.frame(TICK * 4.0 + 0.002);
        assert_eq!(g.session.ticks, 5);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut g = game();
        g.push_input(InputEvent::Flap);
        g.frame(0.0);
        g.frame(10_000.0);
        assert!(g.session.ticks <= 1 + MAX_TICKS_PER_FRAME as u64);
    }

    #[test]
    fn test_quit_stops_loop_before_ticking() {
        let mut g = game();
        g.push_input(InputEvent::Flap);
        g.frame(0.0);
        let ticks = g.session.ticks;
        g.push_input(InputEvent::Quit);
        assert_eq!(g.frame(TICK * 3.0), FrameStatus::Quit);
        assert_eq!(g.session.ticks, ticks);
        assert!(!g.is_running());
        assert_eq!(g.frame(TICK * 6.0), FrameStatus::Quit);
    }

    #[test]
    fn test_flap_input_applied_before_tick() {
        let mut g = game();
        g.push_input(InputEvent::Flap); // starts the run
        g.frame(0.0);
        g.push_input(InputEvent::Flap);
        g.frame(TICK + 0.001);
        // flap (-8) then one tick of gravity
        assert_eq!(g.session.actor.velocity, -7.5);
    }

    #[test]
    fn test_backdrop_scrolls_while_idle() {
        let mut g = game();
        g.frame(0.0);
        g.frame(TICK + 0.001);
        assert_eq!(g.session.phase, SessionPhase::Idle);
        assert_eq!(g.backdrop.floor_offset, -6.0);
        assert!(g.backdrop.cloud_offset > 0.0);
    }

    #[test]
    fn test_floor_offset_wraps() {
        let config = GameConfig::default();
        let mut backdrop = Backdrop::default();
        // 400 / 3 -> wraps on the 134th step (offset reaches -402)
        for _ in 0..133 {
            backdrop.advance(&config);
        }
        assert_eq!(backdrop.floor_offset, -399.0);
        backdrop.advance(&config);
        assert_eq!(backdrop.floor_offset, 0.0);
    }

    #[test]
    fn test_autopilot_starts_and_plays() {
        let mut g = game();
        g.push_input(InputEvent::ToggleAutopilot);
        for i in 0..120 {
            g.frame(i as f64 * TICK + 0.001 * i as f64);
        }
        assert!(g.autopilot);
        assert_eq!(g.session.phase, SessionPhase::Active);
        assert!(g.session.ticks > 100);
    }

    #[test]
    fn test_events_are_collected() {
        let mut g = game();
        g.push_input(InputEvent::Flap);
        // Free fall into the floor
        for i in 0..120 {
            g.frame(i as f64 * TICK + 0.001 * i as f64);
        }
        let events = g.take_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert!(g.take_events().is_empty());
    }

    #[test]
    fn test_fps_estimate() {
        let mut g = game();
        for i in 0..120 {
            g.frame(i as f64 * TICK);
        }
        assert!((59..=61).contains(&g.fps()), "fps = {}", g.fps());
    }
}
