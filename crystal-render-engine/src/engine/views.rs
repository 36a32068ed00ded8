//! Renderer instances that consume the LOD uniforms.
//!
//! The gallery can show a second crystal side by side with the first. Both
//! views receive the same uniform targets in the same frame.

use bevy::prelude::*;
use serde::Serialize;

use crate::engine::lod::parameters::LodParameters;
use crate::engine::lod::uniforms::LodUniforms;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSlot {
    Main,
    Compare,
}

#[derive(Component, Debug, Clone)]
pub struct CrystalView {
    pub slot: ViewSlot,
    /// Values the shaders read this frame.
    pub current: LodUniforms,
    /// Values `current` is easing toward.
    pub target: LodUniforms,
}

impl CrystalView {
    pub fn new(slot: ViewSlot, params: &LodParameters) -> Self {
        let uniforms = LodUniforms::from_parameters(params);
        Self {
            slot,
            current: uniforms,
            target: uniforms,
        }
    }

    pub fn retarget(&mut self, params: &LodParameters) {
        self.target = LodUniforms::from_parameters(params);
    }
}
