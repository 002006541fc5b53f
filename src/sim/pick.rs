//! Click picking (Bounce variant)
//!
//! Each dorayaki is a double-sided disc of radius `scale / 2` in its local XY
//! plane, matching what the renderer draws.

use glam::{EulerRot, Quat, Vec2};

use super::camera::{Camera, Ray};
use super::state::{Dorayaki, SimState};

/// Distance along `ray` to the dorayaki's disc, if the ray crosses it
pub fn ray_disc_distance(ray: &Ray, d: &Dorayaki) -> Option<f32> {
    let rot = Quat::from_euler(EulerRot::XYZ, d.rotation.x, d.rotation.y, d.rotation.z);
    let normal = rot * glam::Vec3::Z;

    let denom = normal.dot(ray.dir);
    if denom.abs() < 1e-6 {
        // Edge-on
        return None;
    }
    let t = normal.dot(d.pos - ray.origin) / denom;
    if t < 0.0 {
        return None;
    }

    let local = rot.inverse() * (ray.at(t) - d.pos);
    let radius = d.scale.abs() * 0.5;
    (local.truncate().length() <= radius).then_some(t)
}

/// Terminate the nearest non-terminating dorayaki under `ndc`
///
/// Returns the id that transitioned. At most one dorayaki changes per call, and
/// nothing happens in variants without picking.
pub fn pick(state: &mut SimState, camera: &Camera, ndc: Vec2) -> Option<u32> {
    if !state.variant.picking_enabled() {
        return None;
    }

    let ray = camera.ray_through(ndc);
    let mut hits: Vec<(f32, usize)> = state
        .dorayakis
        .iter()
        .enumerate()
        .filter_map(|(i, d)| ray_disc_distance(&ray, d).map(|t| (t, i)))
        .collect();
    hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let idx = hits
        .into_iter()
        .map(|(_, i)| i)
        .find(|&i| !state.dorayakis[i].is_terminating())?;

    let d = &mut state.dorayakis[idx];
    d.terminate();
    log::info!("Picked dorayaki {}", d.id);
    Some(d.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Mode, Variant};
    use glam::Vec3;

    fn three_in_a_row(state: &mut SimState) -> [u32; 3] {
        // Inserted far-to-near so insertion order doesn't decide the result
        let far = state.insert_dorayaki(Vec3::new(0.0, 0.0, -20.0), Vec3::ZERO, Vec3::ZERO, 4.0);
        let mid = state.insert_dorayaki(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::ZERO, 4.0);
        let near = state.insert_dorayaki(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO, Vec3::ZERO, 4.0);
        [near, mid, far]
    }

    #[test]
    fn test_pick_terminates_only_nearest() {
        let camera = Camera::new(800.0, 600.0);
        let mut state = SimState::new(Variant::Bounce, 1);
        let [near, mid, far] = three_in_a_row(&mut state);

        let ndc = Camera::viewport_to_ndc(400.0, 300.0, 800.0, 600.0);
        assert_eq!(pick(&mut state, &camera, ndc), Some(near));
        assert_eq!(state.dorayaki(near).unwrap().mode, Mode::Terminating);
        assert_eq!(state.dorayaki(mid).unwrap().mode, Mode::Active);
        assert_eq!(state.dorayaki(far).unwrap().mode, Mode::Active);
    }

    #[test]
    fn test_pick_skips_terminating() {
        let camera = Camera::new(800.0, 600.0);
        let mut state = SimState::new(Variant::Bounce, 1);
        let [near, mid, far] = three_in_a_row(&mut state);

        assert_eq!(pick(&mut state, &camera, Vec2::ZERO), Some(near));
        assert_eq!(pick(&mut state, &camera, Vec2::ZERO), Some(mid));
        assert_eq!(pick(&mut state, &camera, Vec2::ZERO), Some(far));
        assert_eq!(pick(&mut state, &camera, Vec2::ZERO), None);
    }

    #[test]
    fn test_pick_miss() {
        let camera = Camera::new(800.0, 600.0);
        let mut state = SimState::new(Variant::Bounce, 1);
        let id = state.insert_dorayaki(Vec3::new(30.0, 0.0, 0.0), Vec3::ZERO, Vec3::ZERO, 2.0);
        assert_eq!(pick(&mut state, &camera, Vec2::ZERO), None);
        assert_eq!(state.dorayaki(id).unwrap().mode, Mode::Active);
    }

    #[test]
    fn test_pick_off_center_target() {
        let camera = Camera::new(800.0, 600.0);
        let mut state = SimState::new(Variant::Bounce, 1);
        let id = state.insert_dorayaki(Vec3::new(10.0, 5.0, 0.0), Vec3::ZERO, Vec3::ZERO, 3.0);
        let ndc = camera.view_projection().project_point3(Vec3::new(10.0, 5.0, 0.0));
        assert_eq!(pick(&mut state, &camera, Vec2::new(ndc.x, ndc.y)), Some(id));
    }

    #[test]
    fn test_edge_on_disc_is_not_hit() {
        let camera = Camera::default();
        let mut d = Dorayaki::new(1, Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 4.0);
        d.rotation.y = std::f32::consts::FRAC_PI_2;
        let ray = camera.ray_through(Vec2::ZERO);
        assert_eq!(ray_disc_distance(&ray, &d), None);

        d.rotation.y = std::f32::consts::PI;
        let t = ray_disc_distance(&ray, &d).unwrap();
        assert!((t - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_disc_corner_is_not_hit() {
        let camera = Camera::new(800.0, 800.0);
        let mut state = SimState::new(Variant::Bounce, 1);
        let id = state.insert_dorayaki(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 4.0);
        let view_proj = camera.view_projection();

        // Inside the bounding square, outside the radius-2 disc
        let corner = view_proj.project_point3(Vec3::new(1.8, 1.8, 0.0));
        assert_eq!(pick(&mut state, &camera, Vec2::new(corner.x, corner.y)), None);
        assert_eq!(state.dorayaki(id).unwrap().mode, Mode::Active);

        let inside = view_proj.project_point3(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(pick(&mut state, &camera, Vec2::new(inside.x, inside.y)), Some(id));
    }

    #[test]
    fn test_behind_camera_is_not_hit() {
        let camera = Camera::default();
        let d = Dorayaki::new(1, Vec3::new(0.0, 0.0, 60.0), Vec3::ZERO, Vec3::ZERO, 4.0);
        assert_eq!(ray_disc_distance(&camera.ray_through(Vec2::ZERO), &d), None);
    }

    #[test]
    fn test_pick_disabled_outside_bounce() {
        let camera = Camera::default();
        let mut state = SimState::new(Variant::Fall, 1);
        let id = state.insert_dorayaki(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 4.0);
        assert_eq!(pick(&mut state, &camera, Vec2::ZERO), None);
        assert_eq!(state.dorayaki(id).unwrap().mode, Mode::Active);
    }
}
