//! Simulation state and core entity types
//!
//! `SimState` is the single owner of every live dorayaki and beam. The timer,
//! input handler and frame loop all receive it explicitly.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::variant::Variant;
use crate::consts::*;

/// Lifecycle phase of a dorayaki
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Moving under its normal rule
    #[default]
    Active,
    /// Shrinking toward removal (never reverts)
    Terminating,
}

/// A dorayaki entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dorayaki {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Euler angles (XYZ order, radians)
    pub rotation: Vec3,
    /// Added to `rotation` every active frame
    pub rotation_speed: Vec3,
    pub scale: f32,
    pub mode: Mode,
}

impl Dorayaki {
    pub fn new(id: u32, pos: Vec3, vel: Vec3, rotation_speed: Vec3, scale: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            rotation: Vec3::ZERO,
            rotation_speed,
            scale,
            mode: Mode::Active,
        }
    }

    pub fn is_terminating(&self) -> bool {
        self.mode == Mode::Terminating
    }

    /// Enter the terminal shrink phase.
    ///
    /// Returns true if this call caused the transition; a dorayaki that is
    /// already terminating is left untouched.
    pub fn terminate(&mut self) -> bool {
        if self.is_terminating() {
            return false;
        }
        self.mode = Mode::Terminating;
        true
    }
}

/// A homing beam fired from one dorayaki at another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub pos: Vec3,
    /// Id of the target dorayaki (may no longer be live)
    pub target: u32,
    pub speed: f32,
    /// Unit direction toward the target at fire time (orientation only)
    pub heading: Vec3,
}

/// Lifecycle notifications for the render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    DorayakiSpawned(u32),
    DorayakiRemoved(u32),
    BeamFired { id: u32, origin: u32, target: u32 },
    BeamRemoved(u32),
}

/// Tunables that are not fixed by the variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Per-frame probability of firing a beam
    pub beam_chance: f64,
    /// Beam travel per frame
    pub beam_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            beam_chance: BEAM_CHANCE,
            beam_speed: BEAM_SPEED,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub variant: Variant,
    pub config: SimConfig,
    /// Frames simulated so far
    pub frame: u64,
    /// Live dorayaki (insertion order)
    pub dorayakis: Vec<Dorayaki>,
    /// Live beams (insertion order)
    pub beams: Vec<Beam>,
    pub(crate) rng: Pcg32,
    events: Vec<SimEvent>,
    next_id: u32,
}

impl SimState {
    /// Create an empty simulation with the given variant and seed
    pub fn new(variant: Variant, seed: u64) -> Self {
        Self::with_config(variant, seed, SimConfig::default())
    }

    pub fn with_config(variant: Variant, seed: u64, config: SimConfig) -> Self {
        Self {
            seed,
            variant,
            config,
            frame: 0,
            dorayakis: Vec::new(),
            beams: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an active dorayaki with explicit kinematics
    pub fn insert_dorayaki(&mut self, pos: Vec3, vel: Vec3, rotation_speed: Vec3, scale: f32) -> u32 {
        let id = self.next_entity_id();
        self.dorayakis
            .push(Dorayaki::new(id, pos, vel, rotation_speed, scale));
        self.events.push(SimEvent::DorayakiSpawned(id));
        id
    }

    pub fn dorayaki(&self, id: u32) -> Option<&Dorayaki> {
        self.dorayakis.iter().find(|d| d.id == id)
    }

    pub fn dorayaki_mut(&mut self, id: u32) -> Option<&mut Dorayaki> {
        self.dorayakis.iter_mut().find(|d| d.id == id)
    }

    /// Terminate the dorayaki with `id`; false if unknown or already terminating
    pub fn terminate(&mut self, id: u32) -> bool {
        self.dorayaki_mut(id).map(Dorayaki::terminate).unwrap_or(false)
    }

    pub(crate) fn push_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Pending lifecycle events, oldest first
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Take all pending lifecycle events
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminate_is_idempotent() {
        let mut d = Dorayaki::new(1, Vec3::ZERO, Vec3::X, Vec3::ZERO, 4.0);
        assert!(d.terminate());
        let scale = d.scale;
        assert!(!d.terminate());
        assert_eq!(d.mode, Mode::Terminating);
        assert_eq!(d.scale, scale);
    }

    #[test]
    fn test_insert_allocates_ids_and_emits_spawn() {
        let mut state = SimState::new(Variant::Fall, 1);
        let a = state.insert_dorayaki(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 1.0);
        let b = state.insert_dorayaki(Vec3::ONE, Vec3::ZERO, Vec3::ZERO, 1.0);
        assert_ne!(a, b);
        assert_eq!(
            state.drain_events(),
            vec![SimEvent::DorayakiSpawned(a), SimEvent::DorayakiSpawned(b)]
        );
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_state_terminate_by_id() {
        let mut state = SimState::new(Variant::Bounce, 1);
        let id = state.insert_dorayaki(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 1.0);
        assert!(state.terminate(id));
        assert!(!state.terminate(id));
        assert!(!state.terminate(id + 100));
    }
}
