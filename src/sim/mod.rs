//! Deterministic simulation module
//!
//! All animation logic lives here. This module must be pure and deterministic:
//! - One update per rendered frame (no delta-time scaling)
//! - Seeded RNG only
//! - Reverse-index iteration for in-place removal
//! - No rendering or platform dependencies

pub mod beam;
pub mod camera;
pub mod pick;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod variant;

pub use beam::{beam_hits, fire_beam, maybe_fire_beam, update_beams};
pub use camera::{Camera, Ray};
pub use pick::{pick, ray_disc_distance};
pub use spawn::spawn_dorayaki;
pub use state::{Beam, Dorayaki, Mode, SimConfig, SimEvent, SimState};
pub use tick::{tick, update_dorayakis};
pub use variant::Variant;
