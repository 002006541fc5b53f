//! Dorayaki spawner
//!
//! Driven by an external fixed-interval timer, not by the frame loop.

use glam::Vec3;
use rand::Rng;

use super::camera::Camera;
use super::state::SimState;
use super::variant::Variant;
use crate::consts::BOUNCE_DEPTH_EXTENT;

/// Create one randomized active dorayaki and return its id
///
/// Bounce spawns anywhere inside the currently visible volume, so it needs the
/// camera; the falling variants spawn above the view.
pub fn spawn_dorayaki(state: &mut SimState, camera: &Camera) -> u32 {
    let (pos, vel, rotation_speed, scale) = match state.variant {
        Variant::Fall => {
            let rng = &mut state.rng;
            let scale: f32 = rng.random_range(5.0..15.0);
            let pos = Vec3::new(rng.random_range(-50.0..50.0), 60.0 + rng.random_range(0.0..20.0), 0.0);
            let vel = Vec3::new(
                rng.random_range(-0.025..0.025),
                -0.1 - rng.random_range(0.0..0.1),
                0.0,
            );
            let spin = Vec3::new(0.0, 0.0, rng.random_range(-0.01..0.01));
            (pos, vel, spin, scale)
        }
        Variant::Tumble => {
            let rng = &mut state.rng;
            let scale: f32 = rng.random_range(5.0..15.0);
            let pos = Vec3::new(rng.random_range(-60.0..60.0), 60.0 + rng.random_range(0.0..20.0), 0.0);
            let vel = Vec3::new(
                rng.random_range(-0.025..0.025),
                -0.1 - rng.random_range(0.0..0.1),
                0.0,
            );
            let spin = Vec3::new(rng.random_range(-0.02..0.02), rng.random_range(-0.02..0.02), 0.0);
            (pos, vel, spin, scale)
        }
        Variant::Bounce => {
            let half = camera.visible_half_extents(0.0);
            let rng = &mut state.rng;
            let scale: f32 = rng.random_range(3.0..8.0);
            let pos = Vec3::new(
                rng.random_range(-half.x..=half.x),
                rng.random_range(-half.y..=half.y),
                rng.random_range(-BOUNCE_DEPTH_EXTENT..BOUNCE_DEPTH_EXTENT),
            );
            let vel = Vec3::new(
                rng.random_range(-0.1..0.1),
                rng.random_range(-0.1..0.1),
                rng.random_range(-0.1..0.1),
            );
            let spin = Vec3::new(rng.random_range(-0.01..0.01), rng.random_range(-0.01..0.01), 0.0);
            (pos, vel, spin, scale)
        }
    };

    let id = state.insert_dorayaki(pos, vel, rotation_speed, scale);
    log::debug!("Spawned dorayaki {} at {:?} (scale {:.2})", id, pos, scale);
    id
}
