use bevy::prelude::*;
use constants::render_settings::{
    FADE_FAR_FACTOR, FADE_NEAR_MIN, FADE_NEAR_SPAN, HIGHLIGHT_CURVE_KNEE, HIGHLIGHT_OPACITY_FLOOR,
    HIGHLIGHT_POOL_FRACTION,
};

use super::parameters::LodParameters;

/// Uniform block the crystal shaders read every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodUniforms {
    pub line_near: f32,
    pub line_far: f32,
    pub node_near: f32,
    pub node_far: f32,
    pub thinning: f32,
    pub line_density: f32,
    pub node_density: f32,
    pub xor_opacity: f32,
    /// Edge seeds below this belong to the highlight pool.
    pub xor_threshold: f32,
}

impl Default for LodUniforms {
    fn default() -> Self {
        Self::from_parameters(&LodParameters::default())
    }
}

/// Map a draw distance slider value to world-space fade bounds.
pub fn fade_bounds(draw_distance: f32) -> (f32, f32) {
    let near = FADE_NEAR_MIN + (draw_distance / 100.0) * FADE_NEAR_SPAN;
    (near, near * FADE_FAR_FACTOR)
}

/// Highlight pool opacity weight for a slider value.
///
/// Quadratic below the knee for fine control at the low end, exponential
/// above it.
pub fn highlight_opacity(xor_density: f32) -> f32 {
    if xor_density <= HIGHLIGHT_CURVE_KNEE {
        HIGHLIGHT_OPACITY_FLOOR + (xor_density / HIGHLIGHT_CURVE_KNEE).powi(2) * 0.06
    } else {
        0.068 + 0.1 * 100f32.powf((xor_density - HIGHLIGHT_CURVE_KNEE) / (100.0 - HIGHLIGHT_CURVE_KNEE))
    }
}

impl LodUniforms {
    pub fn from_parameters(params: &LodParameters) -> Self {
        let (line_near, line_far) = fade_bounds(params.line_draw_distance());
        let (node_near, node_far) = fade_bounds(params.node_draw_distance());

        Self {
            line_near,
            line_far,
            node_near,
            node_far,
            thinning: params.edge_thinning(),
            line_density: params.line_density() / 100.0,
            node_density: params.node_density() / 100.0,
            xor_opacity: highlight_opacity(params.xor_density()),
            xor_threshold: HIGHLIGHT_POOL_FRACTION,
        }
    }

    /// Move every field toward `target` by `factor` (0 keeps, 1 snaps).
    pub fn approach(&mut self, target: &LodUniforms, factor: f32) {
        let blend = |current: &mut f32, goal: f32| *current += (goal - *current) * factor;
        blend(&mut self.line_near, target.line_near);
        blend(&mut self.line_far, target.line_far);
        blend(&mut self.node_near, target.node_near);
        blend(&mut self.node_far, target.node_far);
        blend(&mut self.thinning, target.thinning);
        blend(&mut self.line_density, target.line_density);
        blend(&mut self.node_density, target.node_density);
        blend(&mut self.xor_opacity, target.xor_opacity);
        blend(&mut self.xor_threshold, target.xor_threshold);
    }

    /// Largest absolute difference to `other` across all fields.
    pub fn max_difference(&self, other: &LodUniforms) -> f32 {
        [
            self.line_near - other.line_near,
            self.line_far - other.line_far,
            self.node_near - other.node_near,
            self.node_far - other.node_far,
            self.thinning - other.thinning,
            self.line_density - other.line_density,
            self.node_density - other.node_density,
            self.xor_opacity - other.xor_opacity,
            self.xor_threshold - other.xor_threshold,
        ]
        .into_iter()
        .map(f32::abs)
        .fold(0.0, f32::max)
    }
}
