//! Scene building
//!
//! Turns the session and backdrop into one flat triangle list in world
//! coordinates, back to front. No GPU types beyond `Vertex` are touched, so
//! this runs (and is tested) on every target.

use glam::Vec2;
use rand::Rng;

use super::shapes::{ellipse, ellipse_in, rect};
use super::vertex::{Vertex, colors};
use crate::driver::Backdrop;
use crate::sim::{GameSession, Obstacle, Rect};

const ELLIPSE_SEGMENTS: u32 = 24;
/// Pipe caps overhang the pipe by this much on each side
const CAP_OVERHANG: f32 = 5.0;
const CAP_HEIGHT: f32 = 20.0;

/// Build the full frame
pub fn build_scene<R: Rng>(session: &GameSession<R>, backdrop: &Backdrop) -> Vec<Vertex> {
    let config = &session.config;
    let mut vertices = Vec::with_capacity(1024);

    // Sky
    vertices.extend(rect(
        &Rect::new(0.0, 0.0, config.world_width, config.world_height),
        colors::SKY,
    ));

    push_clouds(&mut vertices, config.world_width, backdrop.cloud_offset);

    // Obstacles stay on screen after a crash (frozen world)
    for obstacle in &session.obstacles {
        push_obstacle(&mut vertices, obstacle, config.floor_top());
    }

    push_floor(
        &mut vertices,
        config.world_width,
        config.floor_top(),
        config.floor_height,
        backdrop.floor_offset,
    );

    push_bird(&mut vertices, session.actor.rect(), session.actor_rotation());

    vertices
}

fn push_clouds(out: &mut Vec<Vertex>, world_width: f32, offset: f32) {
    let mut i = 0.0;
    while i < world_width * 3.0 {
        let x = i - offset;
        if (-100.0..=world_width).contains(&x) {
            let puffs = [
                Rect::new(x, 50.0, 100.0, 50.0),
                Rect::new(x - 30.0, 70.0, 70.0, 40.0),
                Rect::new(x + 30.0, 70.0, 70.0, 40.0),
            ];
            for puff in &puffs {
                out.extend(ellipse_in(puff, colors::CLOUD, ELLIPSE_SEGMENTS));
            }
        }
        i += world_width;
    }
}

fn push_obstacle(out: &mut Vec<Vertex>, o: &Obstacle, floor_top: f32) {
    out.extend(rect(&o.top_rect(), colors::PIPE));
    // Clip the bottom segment at the floor; the floor is drawn over it anyway
    let bottom = Rect::new(
        o.x,
        o.gap_bottom(),
        o.width,
        (floor_top - o.gap_bottom()).max(0.0),
    );
    out.extend(rect(&bottom, colors::PIPE));

    let cap_w = o.width + CAP_OVERHANG * 2.0;
    out.extend(rect(
        &Rect::new(o.x - CAP_OVERHANG, o.gap_top - CAP_HEIGHT, cap_w, CAP_HEIGHT),
        colors::PIPE_CAP,
    ));
    out.extend(rect(
        &Rect::new(o.x - CAP_OVERHANG, o.gap_bottom(), cap_w, CAP_HEIGHT),
        colors::PIPE_CAP,
    ));
}

fn push_floor(
    out: &mut Vec<Vertex>,
    world_width: f32,
    floor_top: f32,
    floor_height: f32,
    offset: f32,
) {
    out.extend(rect(
        &Rect::new(offset, floor_top, world_width, floor_height),
        colors::FLOOR,
    ));
    out.extend(rect(
        &Rect::new(offset + world_width, floor_top, world_width, floor_height),
        colors::FLOOR,
    ));

    // Markings scroll with the floor
    let mut i = 0.0;
    while i < world_width {
        let x = (i + offset).rem_euclid(world_width * 2.0) - 30.0;
        if (0.0..world_width).contains(&x) {
            out.extend(rect(
                &Rect::new(x, floor_top + 20.0, 20.0, 5.0),
                colors::FLOOR_DETAIL,
            ));
        }
        i += 30.0;
    }
}

fn push_bird(out: &mut Vec<Vertex>, body: Rect, degrees: f32) {
    let center = body.center();
    let half = Vec2::new(body.w / 2.0, body.h / 2.0);

    out.extend(ellipse(center, half, center, degrees, colors::BIRD, ELLIPSE_SEGMENTS));

    // Beak at the front, eye near the top-left, both in body proportions
    let beak_center = center + Vec2::new(half.x * 0.76, 0.0);
    let beak_radii = Vec2::new(body.w * 0.15, body.h / 6.0);
    out.extend(ellipse(beak_center, beak_radii, center, degrees, colors::BEAK, 12));

    let eye_center = center + Vec2::new(-half.x * 0.53, -half.y / 3.0);
    let eye_r = body.h / 6.0;
    out.extend(ellipse(eye_center, Vec2::splat(eye_r), center, degrees, colors::EYE, 12));
}
