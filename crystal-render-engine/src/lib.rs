//! Adaptive level-of-detail crystal viewer.
//!
//! A frame timer feeds FPS samples to a performance governor, which steps six
//! LOD controls up or down to hold a target frame rate. Every crystal view
//! picks up the resulting uniforms in the same frame.

pub mod engine;
pub mod rpc;

pub mod prelude {
    pub use crate::engine::lod::frame_timer::{FpsSample, FrameTimer};
    pub use crate::engine::lod::governor::{GovernorDecision, PerformanceGovernor};
    pub use crate::engine::lod::parameters::{LodControls, LodParam, LodParameters};
    pub use crate::engine::lod::settings::AutoFpsSettings;
    pub use crate::engine::lod::tuning::{GovernorProfile, GovernorTuning, TuningError};
    pub use crate::engine::lod::uniforms::LodUniforms;
    pub use crate::engine::systems::lod_governor::{LodAdjusted, LodGovernorPlugin};
    pub use crate::engine::views::{CrystalView, ViewSlot};
}
