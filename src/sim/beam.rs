//! Homing beams (Bounce variant)
//!
//! A beam holds its target by id only. If the target disappears through another
//! path (a click, or another beam), the beam is discarded on its next update.

use glam::Vec3;
use rand::Rng;

use super::state::{Beam, SimEvent, SimState};
use crate::consts::*;

/// Whether a beam at `beam_pos` is close enough to destroy its target
#[inline]
pub fn beam_hits(beam_pos: Vec3, target_pos: Vec3, target_scale: f32) -> bool {
    beam_pos.distance(target_pos) < target_scale * BEAM_HIT_RADIUS_FACTOR
}

/// Fire a beam from `origin` at `target`
///
/// Returns `None` if either id is not live or both are the same dorayaki.
pub fn fire_beam(state: &mut SimState, origin: u32, target: u32) -> Option<u32> {
    if origin == target {
        return None;
    }
    let from = state.dorayaki(origin)?.pos;
    let to = state.dorayaki(target)?.pos;

    let id = state.next_entity_id();
    state.beams.push(Beam {
        id,
        pos: from,
        target,
        speed: state.config.beam_speed,
        heading: (to - from).normalize_or_zero(),
    });
    state.push_event(SimEvent::BeamFired { id, origin, target });
    log::debug!("Beam {} fired: {} -> {}", id, origin, target);
    Some(id)
}

/// Roll the per-frame beam trigger
///
/// Needs at least two live dorayaki; origin and target are distinct random picks.
pub fn maybe_fire_beam(state: &mut SimState) -> Option<u32> {
    let count = state.dorayakis.len();
    let chance = state.config.beam_chance;
    let chance = if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.0 };
    if count < 2 || !state.rng.random_bool(chance) {
        return None;
    }

    let origin_idx = state.rng.random_range(0..count);
    let mut target_idx = state.rng.random_range(0..count - 1);
    if target_idx >= origin_idx {
        target_idx += 1;
    }

    let origin = state.dorayakis[origin_idx].id;
    let target = state.dorayakis[target_idx].id;
    fire_beam(state, origin, target)
}

/// Advance every beam toward its target's current position
///
/// Reverse iteration; a hit consumes the beam and skips the bounds check. A beam
/// whose position stops being finite counts as out of bounds.
pub fn update_beams(state: &mut SimState) {
    for i in (0..state.beams.len()).rev() {
        let beam_id = state.beams[i].id;
        let target_id = state.beams[i].target;

        let Some(target) = state.dorayakis.iter_mut().find(|d| d.id == target_id) else {
            state.beams.remove(i);
            state.push_event(SimEvent::BeamRemoved(beam_id));
            log::debug!("Beam {} lost target {}", beam_id, target_id);
            continue;
        };

        let beam = &mut state.beams[i];
        let dir = (target.pos - beam.pos).normalize_or_zero();
        beam.pos += dir * beam.speed;

        let remove = if beam_hits(beam.pos, target.pos, target.scale) {
            if target.terminate() {
                log::info!("Beam {} hit dorayaki {}", beam_id, target_id);
            }
            true
        } else {
            !beam.pos.is_finite() || beam.pos.x.abs() > BEAM_BOUND || beam.pos.y.abs() > BEAM_BOUND
        };

        if remove {
            state.beams.remove(i);
            state.push_event(SimEvent::BeamRemoved(beam_id));
        }
    }
}
