//! Adaptive level-of-detail: the parameter surface the crystal shaders read
//! and the frame-rate governor that drives it.

/// Bucketed frame counter producing [`frame_timer::FpsSample`] readings.
pub mod frame_timer;

/// Closed-loop controller stepping the LOD controls one tier per sample.
pub mod governor;

/// The six clamped LOD controls and the get/set trait the governor uses.
pub mod parameters;

/// Ordered degradation and recovery tiers.
pub mod policy;

/// Target FPS and auto-mode toggle.
pub mod settings;

/// Governor step sizes, thresholds and the JSON profile asset.
pub mod tuning;

/// Slider-to-shader uniform mapping and per-frame smoothing.
pub mod uniforms;
