//! Crystal geometry and per-element seeding.
//!
//! Seeds are assigned once when the geometry is built. Density discard and
//! highlight pool membership are pure functions of those seeds, so the
//! governor only ever moves aggregate thresholds.

/// Procedural lattice used when no dataset is attached.
pub mod lattice;

/// Node/edge seeds and visible element counts.
pub mod seeds;
