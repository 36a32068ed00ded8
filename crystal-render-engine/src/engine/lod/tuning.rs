use bevy::prelude::*;
use constants::governor::*;
use constants::lod_ranges::{AUTO_FPS_ENABLED_DEFAULT, TARGET_FPS};
use serde::{Deserialize, Serialize};

/// Step sizes and thresholds driving the performance governor.
///
/// Every field can be overridden from the governor profile JSON; missing
/// fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernorTuning {
    pub hysteresis_band_fps: f32,
    pub recovery_debounce_samples: u32,
    pub highlight_delay_samples: u32,

    pub xor_degrade_step: f32,
    pub thinning_degrade_step: f32,
    pub line_density_degrade_step: f32,
    pub node_density_degrade_step: f32,
    pub draw_distance_degrade_step: f32,

    pub node_density_recover_step: f32,
    pub draw_distance_recover_step: f32,
    pub line_density_recover_step: f32,
    pub thinning_recover_step: f32,
    pub xor_recover_step: f32,
    pub thinning_recover_floor: f32,
}

impl Default for GovernorTuning {
    fn default() -> Self {
        Self {
            hysteresis_band_fps: HYSTERESIS_BAND_FPS,
            recovery_debounce_samples: RECOVERY_DEBOUNCE_SAMPLES,
            highlight_delay_samples: HIGHLIGHT_DELAY_SAMPLES,
            xor_degrade_step: XOR_DEGRADE_STEP,
            thinning_degrade_step: THINNING_DEGRADE_STEP,
            line_density_degrade_step: LINE_DENSITY_DEGRADE_STEP,
            node_density_degrade_step: NODE_DENSITY_DEGRADE_STEP,
            draw_distance_degrade_step: DRAW_DISTANCE_DEGRADE_STEP,
            node_density_recover_step: NODE_DENSITY_RECOVER_STEP,
            draw_distance_recover_step: DRAW_DISTANCE_RECOVER_STEP,
            line_density_recover_step: LINE_DENSITY_RECOVER_STEP,
            thinning_recover_step: THINNING_RECOVER_STEP,
            xor_recover_step: XOR_RECOVER_STEP,
            thinning_recover_floor: THINNING_RECOVER_FLOOR,
        }
    }
}

/// Error types for governor tuning validation.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    NonPositiveStep { field: &'static str, value: f32 },
    InvalidHysteresisBand(f32),
    ThinningFloorOutOfRange(f32),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::NonPositiveStep { field, value } => {
                write!(f, "Step '{}' must be positive, got {}", field, value)
            }
            TuningError::InvalidHysteresisBand(band) => {
                write!(f, "Hysteresis band must be positive, got {}", band)
            }
            TuningError::ThinningFloorOutOfRange(floor) => {
                write!(f, "Thinning recovery floor {} is outside [0, 1]", floor)
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl GovernorTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        let steps = [
            ("xor_degrade_step", self.xor_degrade_step),
            ("thinning_degrade_step", self.thinning_degrade_step),
            ("line_density_degrade_step", self.line_density_degrade_step),
            ("node_density_degrade_step", self.node_density_degrade_step),
            ("draw_distance_degrade_step", self.draw_distance_degrade_step),
            ("node_density_recover_step", self.node_density_recover_step),
            ("draw_distance_recover_step", self.draw_distance_recover_step),
            ("line_density_recover_step", self.line_density_recover_step),
            ("thinning_recover_step", self.thinning_recover_step),
            ("xor_recover_step", self.xor_recover_step),
        ];

        // `!(v > 0.0)` also rejects NaN.
        if let Some((field, value)) = steps.into_iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(TuningError::NonPositiveStep { field, value });
        }

        if !(self.hysteresis_band_fps > 0.0) {
            return Err(TuningError::InvalidHysteresisBand(self.hysteresis_band_fps));
        }

        if !(0.0..=1.0).contains(&self.thinning_recover_floor) {
            return Err(TuningError::ThinningFloorOutOfRange(
                self.thinning_recover_floor,
            ));
        }

        Ok(())
    }
}

/// Governor profile loaded from `lod/governor.tuning.json`.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernorProfile {
    pub target_fps: f32,
    pub auto_enabled: bool,
    pub tuning: GovernorTuning,
}

impl Default for GovernorProfile {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS.default,
            auto_enabled: AUTO_FPS_ENABLED_DEFAULT,
            tuning: GovernorTuning::default(),
        }
    }
}
