//! Default step sizes and thresholds for the performance governor.
//!
//! These were tuned by eye against the crystal datasets; treat them as
//! starting points rather than hard limits.

/// FPS above `target + band` counts as a good sample.
pub const HYSTERESIS_BAND_FPS: f32 = 1.0;

/// Good samples required (exclusive) before any recovery step.
pub const RECOVERY_DEBOUNCE_SAMPLES: u32 = 4;

/// Low samples at the highlight floor required (exclusive) before escalating.
pub const HIGHLIGHT_DELAY_SAMPLES: u32 = 5;

// Degradation steps
pub const XOR_DEGRADE_STEP: f32 = 5.0;
pub const THINNING_DEGRADE_STEP: f32 = 0.1;
pub const LINE_DENSITY_DEGRADE_STEP: f32 = 8.0;
pub const NODE_DENSITY_DEGRADE_STEP: f32 = 4.0;
pub const DRAW_DISTANCE_DEGRADE_STEP: f32 = 20.0;

// Recovery steps
pub const NODE_DENSITY_RECOVER_STEP: f32 = 2.0;
pub const DRAW_DISTANCE_RECOVER_STEP: f32 = 5.0;
pub const LINE_DENSITY_RECOVER_STEP: f32 = 1.0;
pub const THINNING_RECOVER_STEP: f32 = 0.05;
pub const XOR_RECOVER_STEP: f32 = 1.0;

/// Recovery never relaxes thinning below this.
pub const THINNING_RECOVER_FLOOR: f32 = 0.4;
