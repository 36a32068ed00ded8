//! Shared constants for the crystal viewer: LOD parameter ranges, governor
//! tuning defaults, frame timing and renderer uniform mapping.

pub mod frame_timing;
pub mod governor;
pub mod lod_ranges;
pub mod render_settings;
