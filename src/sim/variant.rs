//! Animation variants
//!
//! Each variant picks a spawn distribution, a motion rule and which extras
//! (beams, picking) are live.

use serde::{Deserialize, Serialize};

/// Which flavour of the animation is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Dorayaki rain from above and get sucked into the mouth
    #[default]
    Fall,
    /// Dorayaki drift inside the view, bounce off its edges, shoot beams, and can be clicked
    Bounce,
    /// Like `Fall`, but tumbling on two axes
    Tumble,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Fall => "fall",
            Variant::Bounce => "bounce",
            Variant::Tumble => "tumble",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fall" | "1" => Some(Variant::Fall),
            "bounce" | "2" => Some(Variant::Bounce),
            "tumble" | "3" => Some(Variant::Tumble),
            _ => None,
        }
    }

    /// Terminating dorayaki are pulled toward the mouth
    pub fn sucks_to_mouth(&self) -> bool {
        matches!(self, Variant::Fall | Variant::Tumble)
    }

    /// Active dorayaki reflect off the visible bounds
    pub fn bounces(&self) -> bool {
        matches!(self, Variant::Bounce)
    }

    /// Beams are fired between dorayaki
    pub fn fires_beams(&self) -> bool {
        matches!(self, Variant::Bounce)
    }

    /// Clicking a dorayaki terminates it
    pub fn picking_enabled(&self) -> bool {
        matches!(self, Variant::Bounce)
    }
}
