//! Crystal drawing from the per-view LOD uniforms.

/// Gizmo line/node pass with distance fade and density discard.
pub mod crystal_gizmos;
