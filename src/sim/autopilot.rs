//! Demo autopilot
//!
//! A simple controller that keeps the actor near the lower part of the next
//! gap. Good enough to clear most gaps; not a perfect player.

use rand::Rng;

use super::state::GameSession;

/// How far above the gap bottom the autopilot aims (in actor heights)
const AIM_ABOVE_GAP_BOTTOM: f32 = 1.5;

/// Should the autopilot flap this frame? While idle this means "start".
pub fn autopilot_wants_flap<R: Rng>(session: &GameSession<R>) -> bool {
    if !session.is_active() {
        return true;
    }

    let actor = session.actor.rect();
    let target_y = session
        .obstacles
        .iter()
        .find(|o| o.right() >= actor.left())
        .map(|o| o.gap_bottom() - session.actor.height * AIM_ABOVE_GAP_BOTTOM)
        .unwrap_or(session.config.floor_top() / 2.0);

    let falling = session.actor.velocity >= 0.0;
    falling && actor.bottom() > target_y
}
