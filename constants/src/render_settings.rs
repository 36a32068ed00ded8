/// Nearest fade-start distance (world units) at draw distance 0.
pub const FADE_NEAR_MIN: f32 = 2.0;

/// Fade-start span covered by the full draw distance slider.
pub const FADE_NEAR_SPAN: f32 = 148.0;

/// Fade end as a multiple of fade start.
pub const FADE_FAR_FACTOR: f32 = 1.5;

/// Fraction of edges tagged into the highlight pool at build time.
pub const HIGHLIGHT_POOL_FRACTION: f32 = 0.02;

/// Minimum highlight opacity so some pool edges always show.
pub const HIGHLIGHT_OPACITY_FLOOR: f32 = 0.008;

/// Slider value where the highlight opacity curve switches from quadratic to exponential.
pub const HIGHLIGHT_CURVE_KNEE: f32 = 33.0;

/// Per-frame blend factor when moving live uniforms toward their targets.
pub const UNIFORM_SMOOTHING: f32 = 0.2;

/// Live uniforms within this distance of their targets snap to them.
pub const UNIFORM_SNAP_EPSILON: f32 = 1e-4;
