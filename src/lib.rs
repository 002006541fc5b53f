//! Dorayaki - decorative falling/bouncing dorayaki for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, beams, picking)
//! - `renderer`: WebGPU presentation of the simulation
//! - `settings`: User-tunable configuration persisted to LocalStorage

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::Variant;

/// Simulation configuration constants
pub mod consts {
    use glam::Vec3;

    /// Spawn cadence of the external timer (milliseconds)
    pub const SPAWN_INTERVAL_MS: u32 = 300;
    /// Nominal frame rate the per-frame constants are tuned for
    pub const NOMINAL_FPS: u32 = 60;

    /// Point terminating dorayaki are sucked into (Fall/Tumble)
    pub const MOUTH_POS: Vec3 = Vec3::new(0.0, -40.0, 0.0);
    /// Fraction of the remaining distance to the mouth covered per frame
    pub const SUCK_LERP: f32 = 0.05;
    /// Per-frame scale multiplier while terminating
    pub const SHRINK_FACTOR: f32 = 0.95;
    /// Terminating dorayaki below this scale are removed
    pub const REMOVE_SCALE: f32 = 0.1;
    /// Falling dorayaki start terminating below this height
    pub const SUCK_TRIGGER_Y: f32 = -35.0;

    /// Depth half-extent for Bounce reflection (x/y come from the camera)
    pub const BOUNCE_DEPTH_EXTENT: f32 = 10.0;

    /// Per-frame probability of firing a beam
    pub const BEAM_CHANCE: f64 = 0.01;
    /// Beam travel per frame
    pub const BEAM_SPEED: f32 = 0.8;
    /// Hit radius as a fraction of the target's scale
    pub const BEAM_HIT_RADIUS_FACTOR: f32 = 0.5;
    /// Beams beyond this |x| or |y| are discarded
    pub const BEAM_BOUND: f32 = 100.0;
    /// Rendered beam length (world units)
    pub const BEAM_LENGTH: f32 = 3.0;

    /// Camera defaults
    pub const CAMERA_FOV_DEG: f32 = 75.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;
    pub const CAMERA_Z: f32 = 50.0;
}

/// Number of frames a terminating dorayaki of `scale` survives before removal
///
/// Closed form of the geometric shrink: `ceil(ln(REMOVE_SCALE / scale) / ln(SHRINK_FACTOR))`.
#[inline]
pub fn frames_to_removal(scale: f32) -> u32 {
    use consts::{REMOVE_SCALE, SHRINK_FACTOR};
    if scale < REMOVE_SCALE {
        return 1;
    }
    ((REMOVE_SCALE / scale).ln() / SHRINK_FACTOR.ln()).ceil() as u32
}
