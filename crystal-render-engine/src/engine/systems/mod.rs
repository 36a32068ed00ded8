//! Core runtime systems for frame timing and adaptive LOD.
//!
//! Provides FPS tracking, the governor loop that keeps the crystal views at
//! the target frame rate, and loading of the governor tuning profile.

/// FPS tracking and notification systems for performance monitoring.
///
/// Feeds the bucketed frame timer, publishes samples to the frontend via RPC
/// and updates the native UI overlay.
pub mod fps_tracking;

/// Governor tuning profile loading from the JSON asset.
///
/// Validates the profile before applying it; invalid tuning keeps the defaults.
pub mod governor_profile;

/// Performance governor loop and propagation of LOD values to every view.
///
/// Handles keyboard overrides on native builds; WASM builds are driven over RPC.
pub mod lod_governor;
