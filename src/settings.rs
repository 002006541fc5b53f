//! Animation settings
//!
//! Persisted in LocalStorage; individual fields can be overridden from the page
//! URL query string (`?variant=bounce&seed=7`).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{SimConfig, Variant};

/// Animation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Which animation runs
    pub variant: Variant,
    /// Spawn timer cadence (milliseconds)
    pub spawn_interval_ms: u32,
    /// Per-frame beam probability (Bounce only)
    pub beam_chance: f64,
    /// Beam travel per frame (Bounce only)
    pub beam_speed: f32,
    /// Fixed RNG seed; `None` seeds from the clock
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            beam_chance: BEAM_CHANCE,
            beam_speed: BEAM_SPEED,
            seed: None,
        }
    }
}

impl Settings {
    /// Simulation tunables derived from these settings
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            beam_chance: if self.beam_chance.is_finite() {
                self.beam_chance.clamp(0.0, 1.0)
            } else {
                BEAM_CHANCE
            },
            beam_speed: if self.beam_speed.is_finite() {
                self.beam_speed
            } else {
                BEAM_SPEED
            },
        }
    }

    /// Apply `key=value` pairs from a URL query string
    ///
    /// Unknown keys, unparsable values and non-finite numbers are ignored.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "variant" => {
                    if let Some(v) = Variant::from_str(value) {
                        self.variant = v;
                    }
                }
                "interval" => {
                    if let Ok(ms) = value.parse::<u32>() {
                        self.spawn_interval_ms = ms.max(1);
                    }
                }
                "beam_chance" => {
                    if let Some(p) = value.parse::<f64>().ok().filter(|p| p.is_finite()) {
                        self.beam_chance = p.clamp(0.0, 1.0);
                    }
                }
                "beam_speed" => {
                    if let Some(s) = value.parse::<f32>().ok().filter(|s| s.is_finite()) {
                        self.beam_speed = s;
                    }
                }
                "seed" => {
                    if let Ok(seed) = value.parse::<u64>() {
                        self.seed = Some(seed);
                    }
                }
                _ => log::warn!("Ignoring unknown setting '{}'", key),
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dorayaki_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_overrides() {
        let mut settings = Settings::default();
        settings.apply_query("?variant=bounce&seed=7&interval=150&beam_chance=0.5");
        assert_eq!(settings.variant, Variant::Bounce);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.spawn_interval_ms, 150);
        assert_eq!(settings.beam_chance, 0.5);
    }

    #[test]
    fn test_query_ignores_garbage() {
        let mut settings = Settings::default();
        settings.apply_query("variant=sideways&seed=abc&&flag&beam_chance=7");
        assert_eq!(settings.variant, Variant::Fall);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.beam_chance, 1.0);
    }

    #[test]
    fn test_query_rejects_nan() {
        let mut settings = Settings::default();
        settings.apply_query("variant=bounce&beam_chance=NaN&beam_speed=nan");
        assert_eq!(settings.variant, Variant::Bounce);
        assert_eq!(settings.beam_chance, BEAM_CHANCE);
        assert_eq!(settings.beam_speed, BEAM_SPEED);

        settings.apply_query("beam_chance=inf&beam_speed=-inf");
        assert_eq!(settings.beam_chance, BEAM_CHANCE);
        assert_eq!(settings.beam_speed, BEAM_SPEED);
    }

    #[test]
    fn test_sim_config_replaces_non_finite() {
        let settings = Settings {
            beam_chance: f64::NAN,
            beam_speed: f32::INFINITY,
            ..Settings::default()
        };
        let config = settings.sim_config();
        assert_eq!(config.beam_chance, BEAM_CHANCE);
        assert_eq!(config.beam_speed, BEAM_SPEED);
    }

    #[test]
    fn test_missing_seed_field_deserializes() {
        let json = r#"{"variant":"Tumble","spawn_interval_ms":300,"beam_chance":0.01,"beam_speed":0.8}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.variant, Variant::Tumble);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_sim_config_clamps_chance() {
        let settings = Settings {
            beam_chance: 3.0,
            ..Settings::default()
        };
        assert_eq!(settings.sim_config().beam_chance, 1.0);
        assert_eq!(settings.sim_config().beam_speed, BEAM_SPEED);
    }
}
