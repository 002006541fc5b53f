//! Shape generation for projected scene primitives
//!
//! Everything is projected to clip space on the CPU with the camera's
//! view-projection matrix. There is no depth buffer, so dorayaki are emitted
//! back to front.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::f32::consts::TAU;

use super::vertex::{Vertex, colors};
use crate::consts::BEAM_LENGTH;
use crate::sim::{Beam, Camera, Dorayaki, SimState};

/// Segments per disc
const DISC_SEGMENTS: u32 = 24;
/// Beam width in NDC units
const BEAM_WIDTH: f32 = 0.006;

/// Project a world point to NDC; `None` if it lies behind the camera
fn project(view_proj: &Mat4, p: Vec3) -> Option<Vec2> {
    let clip = *view_proj * p.extend(1.0);
    if clip.w <= 1e-4 {
        return None;
    }
    Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
}

/// Generate vertices for a filled disc lying in the rotated local XY plane
pub fn disc(
    center: Vec3,
    rot: Quat,
    radius: f32,
    color: [f32; 4],
    segments: u32,
    view_proj: &Mat4,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let Some(c) = project(view_proj, center) else {
        return vertices;
    };

    let rim = |i: u32| {
        let theta = (i as f32 / segments as f32) * TAU;
        let local = Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0);
        project(view_proj, center + rot * local)
    };

    for i in 0..segments {
        // Triangle from center to edge
        if let (Some(a), Some(b)) = (rim(i), rim(i + 1)) {
            vertices.push(Vertex::new(c.x, c.y, color));
            vertices.push(Vertex::new(a.x, a.y, color));
            vertices.push(Vertex::new(b.x, b.y, color));
        }
    }

    vertices
}

/// Generate vertices for one dorayaki (rim, crust, filling)
pub fn dorayaki(d: &Dorayaki, view_proj: &Mat4) -> Vec<Vertex> {
    let rot = Quat::from_euler(EulerRot::XYZ, d.rotation.x, d.rotation.y, d.rotation.z);
    let r = d.scale * 0.5;
    let mut vertices = disc(d.pos, rot, r, colors::CRUST_EDGE, DISC_SEGMENTS, view_proj);
    vertices.extend(disc(d.pos, rot, r * 0.9, colors::CRUST, DISC_SEGMENTS, view_proj));
    vertices.extend(disc(d.pos, rot, r * 0.35, colors::ANKO, DISC_SEGMENTS, view_proj));
    vertices
}

/// Generate vertices for a beam streak trailing behind its head
pub fn beam(b: &Beam, view_proj: &Mat4) -> Vec<Vertex> {
    let (Some(head), Some(tail)) = (
        project(view_proj, b.pos),
        project(view_proj, b.pos - b.heading * BEAM_LENGTH),
    ) else {
        return Vec::new();
    };

    let dir = (head - tail).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * BEAM_WIDTH;
    let color = colors::BEAM;

    let h1 = head + perp;
    let h2 = head - perp;
    let t1 = tail + perp;
    let t2 = tail - perp;

    vec![
        Vertex::new(t1.x, t1.y, color),
        Vertex::new(t2.x, t2.y, color),
        Vertex::new(h1.x, h1.y, color),
        Vertex::new(h1.x, h1.y, color),
        Vertex::new(t2.x, t2.y, color),
        Vertex::new(h2.x, h2.y, color),
    ]
}

/// All vertices for the current frame
pub fn scene_vertices(state: &SimState, camera: &Camera) -> Vec<Vertex> {
    let view_proj = camera.view_projection();

    let mut order: Vec<&Dorayaki> = state.dorayakis.iter().collect();
    // Farthest first (camera looks down -Z)
    order.sort_by(|a, b| a.pos.z.partial_cmp(&b.pos.z).unwrap_or(std::cmp::Ordering::Equal));

    let mut vertices = Vec::with_capacity(order.len() * (DISC_SEGMENTS as usize) * 9);
    for d in order {
        vertices.extend(dorayaki(d, &view_proj));
    }
    for b in &state.beams {
        vertices.extend(beam(b, &view_proj));
    }
    vertices
}
