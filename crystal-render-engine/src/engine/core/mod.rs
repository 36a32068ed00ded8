//! Application setup for native and WASM targets.

/// Builds the app: default plugins, LOD pipeline, RPC bridge and the demo scene.
pub mod app_setup;

/// Platform-specific window configuration.
///
/// Attaches to the `#bevy` canvas on web targets.
pub mod window_config;
