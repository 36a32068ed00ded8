//! JSON-RPC 2.0 bridge between the viewer and its host page.
//!
//! The viewer runs inside an iframe. The host page reflects the LOD controls
//! in its UI and may override them; the viewer pushes FPS samples and
//! governor adjustments back.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Apply to LOD resources
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Methods
//!
//! - `get_fps`: last FPS sample, 0 before the first one
//! - `get_lod_params`: all six controls plus `targetFps` and `autoFpsEnabled`
//! - `set_lod_param { key, value }`: operator override, clamped to the control's range
//! - `set_target_fps { fps }`: clamped to 10-120
//! - `set_auto_fps { enabled }`: toggle the governor
//! - `reset_lod_params`: restore every control to its default
//!
//! Requests without an `id` are applied but receive no response.
//!
//! ## Notifications
//!
//! - `fps_update { fps }`: once per FPS sample
//! - `lod_params_changed { params, source, fps, decision, views }`: after a
//!   governor step changed the surface
//!
//! ## Error Codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (missing field, wrong type, unknown control key)

/// postMessage listener, request dispatch and the outgoing message queue.
pub mod web_rpc;
