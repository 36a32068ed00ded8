use bevy::prelude::*;

use crate::engine::geometry::seeds::{CrystalGeometry, is_highlight_edge, is_retained};
use crate::engine::lod::uniforms::LodUniforms;
use crate::engine::views::CrystalView;

const NODE_COLOUR: Vec3 = Vec3::new(0.85, 0.9, 1.0);
const LINE_COLOUR: Vec3 = Vec3::new(0.55, 0.6, 0.75);
const HIGHLIGHT_COLOUR: Vec3 = Vec3::new(0.0, 0.95, 1.0);
const NODE_RADIUS: f32 = 0.04;

const LINE_ALPHA_CUTOFF: f32 = 0.005;
const HIGHLIGHT_ALPHA_CUTOFF: f32 = 0.001;

/// Squared distance fade, 1 inside `near`, 0 past `far`.
pub fn distance_fog(distance: f32, near: f32, far: f32) -> f32 {
    let t = ((distance - near) / (far - near).max(f32::EPSILON)).clamp(0.0, 1.0);
    let fade = 1.0 - t * t * (3.0 - 2.0 * t);
    fade * fade
}

/// Alpha of a standard line. Thinning blends toward a steeper fade, and
/// sparser lines are drawn brighter to keep the structure readable.
pub fn line_alpha(fog: f32, uniforms: &LodUniforms) -> f32 {
    let thinning = 1.0 + (fog.powi(4) - 1.0) * uniforms.thinning;
    let boost = 1.0 + (1.0 - uniforms.line_density) * 1.5;
    thinning * fog * boost
}

pub fn highlight_alpha(fog: f32, uniforms: &LodUniforms) -> f32 {
    let thinning = 1.0 + (fog.powi(3) - 1.0) * uniforms.thinning;
    uniforms.xor_opacity * thinning * fog
}

fn colour(rgb: Vec3, alpha: f32) -> Color {
    Color::srgba(rgb.x, rgb.y, rgb.z, alpha.clamp(0.0, 1.0))
}

/// Immediate-mode draw of every active crystal view with its current uniforms.
pub fn draw_crystal_views(
    mut gizmos: Gizmos,
    views: Query<(&CrystalView, &Camera, &GlobalTransform, &CrystalGeometry)>,
) {
    for (view, camera, camera_transform, geometry) in &views {
        if !camera.is_active {
            continue;
        }
        let eye = camera_transform.translation();
        let uniforms = &view.current;

        for (position, seed) in geometry.nodes() {
            if !is_retained(seed, uniforms.node_density) {
                continue;
            }
            let fog = distance_fog(eye.distance(position), uniforms.node_near, uniforms.node_far);
            if fog < LINE_ALPHA_CUTOFF {
                continue;
            }
            gizmos.sphere(
                Isometry3d::from_translation(position),
                NODE_RADIUS,
                colour(NODE_COLOUR, fog),
            );
        }

        for (start, end, segment_seed, edge_seed) in geometry.edges() {
            let midpoint = (start + end) * 0.5;
            let fog = distance_fog(eye.distance(midpoint), uniforms.line_near, uniforms.line_far);

            if is_highlight_edge(edge_seed, uniforms.xor_threshold) {
                let alpha = highlight_alpha(fog, uniforms);
                if alpha >= HIGHLIGHT_ALPHA_CUTOFF {
                    gizmos.line(start, end, colour(HIGHLIGHT_COLOUR, alpha));
                }
            } else if is_retained(segment_seed, uniforms.line_density) {
                let alpha = line_alpha(fog, uniforms);
                if alpha >= LINE_ALPHA_CUTOFF {
                    gizmos.line(start, end, colour(LINE_COLOUR, alpha));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lod::parameters::{LodParam, LodParameters};

    #[test]
    fn fog_is_one_inside_near_and_zero_past_far() {
        assert_eq!(distance_fog(1.0, 10.0, 15.0), 1.0);
        assert_eq!(distance_fog(20.0, 10.0, 15.0), 0.0);
        let mid = distance_fog(12.5, 10.0, 15.0);
        assert!((mid - 0.25).abs() < 1e-6);
    }

    #[test]
    fn thinning_darkens_distant_lines_only() {
        let plain = LodUniforms::from_parameters(&LodParameters::default().with(LodParam::EdgeThinning, 0.0));
        let thinned = LodUniforms::from_parameters(&LodParameters::default().with(LodParam::EdgeThinning, 1.0));

        assert_eq!(line_alpha(1.0, &plain), line_alpha(1.0, &thinned));
        assert!(line_alpha(0.5, &thinned) < line_alpha(0.5, &plain));
    }

    #[test]
    fn highlight_alpha_follows_xor_density() {
        let full = LodUniforms::default();
        let floor = LodUniforms::from_parameters(&LodParameters::default().with(LodParam::XorDensity, 5.0));

        assert!(highlight_alpha(1.0, &floor) < highlight_alpha(1.0, &full));
    }
}
