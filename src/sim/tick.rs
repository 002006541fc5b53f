//! Per-frame simulation tick
//!
//! One call per rendered frame. Integration is frame-coupled (no delta time),
//! so all per-frame constants assume the nominal 60 Hz refresh.

use glam::Vec3;

use super::beam::{maybe_fire_beam, update_beams};
use super::camera::Camera;
use super::state::{Dorayaki, Mode, SimEvent, SimState};
use super::variant::Variant;
use crate::consts::*;

/// Advance the simulation by one frame
pub fn tick(state: &mut SimState, camera: &Camera) {
    update_dorayakis(state, camera);

    if state.variant.fires_beams() {
        update_beams(state);
        maybe_fire_beam(state);
    }

    state.frame += 1;
}

/// Move, shrink and compact the live dorayaki
///
/// Iterates in reverse so removing index `i` never shifts an element that is
/// still to be visited.
pub fn update_dorayakis(state: &mut SimState, camera: &Camera) {
    let variant = state.variant;
    // Recomputed every frame: a resize can change the bounds at any time
    let bounds = variant
        .bounces()
        .then(|| camera.visible_half_extents(0.0).extend(BOUNCE_DEPTH_EXTENT));

    for i in (0..state.dorayakis.len()).rev() {
        let d = &mut state.dorayakis[i];
        match d.mode {
            Mode::Terminating => {
                if variant.sucks_to_mouth() {
                    d.pos = d.pos.lerp(MOUTH_POS, SUCK_LERP);
                }
                d.scale *= SHRINK_FACTOR;

                if d.scale.abs() < REMOVE_SCALE {
                    let id = d.id;
                    state.dorayakis.remove(i);
                    state.push_event(SimEvent::DorayakiRemoved(id));
                    log::debug!("Removed dorayaki {}", id);
                }
            }
            Mode::Active => {
                d.pos += d.vel;
                d.rotation += d.rotation_speed;

                match variant {
                    Variant::Fall | Variant::Tumble => {
                        if d.pos.y < SUCK_TRIGGER_Y {
                            d.terminate();
                        }
                    }
                    Variant::Bounce => {
                        if let Some(bounds) = bounds {
                            reflect_off_bounds(d, bounds);
                        }
                    }
                }
            }
        }
    }
}

/// Negate each velocity component that carries the dorayaki further outside
/// `half_extents`; components already heading back inside are left alone.
pub(crate) fn reflect_off_bounds(d: &mut Dorayaki, half_extents: Vec3) {
    for axis in 0..3 {
        let p = d.pos[axis];
        let v = d.vel[axis];
        if p.abs() > half_extents[axis] && p * v > 0.0 {
            d.vel[axis] = -v;
        }
    }
}
