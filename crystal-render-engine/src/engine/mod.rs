pub mod core;
pub mod geometry;
pub mod lod;
pub mod render;
pub mod systems;
pub mod views;
