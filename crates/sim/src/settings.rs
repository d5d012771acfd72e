use std::f32::consts::FRAC_PI_4;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Process-wide simulation configuration.
///
/// Defaults reproduce the stock sandbox. A JSON file may override any
/// subset of fields; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Gate for the periodic perturbation. The timer runs either way.
    pub random_motion: bool,
    /// Perturbation period in milliseconds.
    pub perturb_interval_ms: u64,
    /// Keyboard nudge distance in world units.
    pub nudge_step: f32,
    /// Half-width of the uniform horizontal impulse range.
    pub impulse_strength: f32,
    /// Upper bound (exclusive) of the uniform yaw increase, radians.
    pub max_spin: f32,
    /// RNG seed for reproducible perturbation sequences.
    pub seed: u64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            random_motion: true,
            perturb_interval_ms: 500,
            nudge_step: 0.1,
            impulse_strength: 1.0,
            max_spin: FRAC_PI_4,
            seed: 42,
        }
    }
}

/// Errors from loading a settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimSettings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn perturb_interval(&self) -> Duration {
        Duration::from_millis(self.perturb_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_sandbox() {
        let s = SimSettings::default();
        assert!(s.random_motion);
        assert_eq!(s.perturb_interval_ms, 500);
        assert_eq!(s.nudge_step, 0.1);
        assert_eq!(s.impulse_strength, 1.0);
        assert_eq!(s.max_spin, FRAC_PI_4);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s: SimSettings = serde_json::from_str(r#"{"random_motion": false}"#).unwrap();
        assert!(!s.random_motion);
        assert_eq!(s.perturb_interval_ms, 500);
        assert_eq!(s.nudge_step, 0.1);
    }

    #[test]
    fn full_json_overrides_everything() {
        let s: SimSettings = serde_json::from_str(
            r#"{
                "random_motion": false,
                "perturb_interval_ms": 250,
                "nudge_step": 0.5,
                "impulse_strength": 2.0,
                "max_spin": 1.0,
                "seed": 7
            }"#,
        )
        .unwrap();
        assert_eq!(s.perturb_interval_ms, 250);
        assert_eq!(s.perturb_interval(), Duration::from_millis(250));
        assert_eq!(s.seed, 7);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = serde_json::from_str::<SimSettings>("{not json").unwrap_err();
        assert!(err.is_syntax());
    }
}
