use bevy::prelude::*;
use constants::lod_ranges::{AUTO_FPS_ENABLED_DEFAULT, TARGET_FPS};

/// Operator-facing governor configuration. Changes apply on the next sample.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AutoFpsSettings {
    target_fps: f32,
    auto_enabled: bool,
}

impl Default for AutoFpsSettings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS.default,
            auto_enabled: AUTO_FPS_ENABLED_DEFAULT,
        }
    }
}

impl AutoFpsSettings {
    pub fn target_fps(&self) -> f32 {
        self.target_fps
    }

    pub fn auto_enabled(&self) -> bool {
        self.auto_enabled
    }

    /// Clamp to the supported 10-120 range and store.
    pub fn set_target_fps(&mut self, fps: f32) -> f32 {
        self.target_fps = TARGET_FPS.clamp(fps);
        self.target_fps
    }

    pub fn set_auto_enabled(&mut self, enabled: bool) {
        self.auto_enabled = enabled;
    }
}
