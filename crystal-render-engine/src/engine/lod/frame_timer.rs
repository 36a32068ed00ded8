use bevy::prelude::*;
use constants::frame_timing::{FPS_WINDOW_MS, FRAME_BUCKET_MS};

/// One smoothed frame-rate reading, emitted roughly four times a second.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FpsSample {
    pub fps: f32,
}

/// Bucketed frame counter.
///
/// Frames are counted by 60Hz bucket index rather than raw deltas, so jitter
/// between consecutive frames does not leak into the reading. The first frame
/// opens the window; a stalled clock never closes it.
#[derive(Resource, Debug, Clone)]
pub struct FrameTimer {
    bucket_ms: f64,
    window_ms: f64,
    window_start: Option<f64>,
    last_bucket: Option<i64>,
    frames: u32,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(FRAME_BUCKET_MS, FPS_WINDOW_MS)
    }
}

impl FrameTimer {
    pub fn new(bucket_ms: f64, window_ms: f64) -> Self {
        Self {
            bucket_ms,
            window_ms,
            window_start: None,
            last_bucket: None,
            frames: 0,
        }
    }

    /// Record a rendered frame at `now_ms`. Returns a sample when the window closes.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<FpsSample> {
        let bucket = (now_ms / self.bucket_ms).floor() as i64;

        let Some(start) = self.window_start else {
            self.window_start = Some(now_ms);
            self.last_bucket = Some(bucket);
            return None;
        };

        if self.last_bucket == Some(bucket) {
            return None;
        }
        self.last_bucket = Some(bucket);
        self.frames += 1;

        let elapsed_ms = now_ms - start;
        if elapsed_ms < self.window_ms {
            return None;
        }

        let fps = self.frames as f64 / (elapsed_ms / 1000.0);
        self.frames = 0;
        self.window_start = Some(now_ms);

        Some(FpsSample { fps: fps as f32 })
    }

    pub fn frames_in_window(&self) -> u32 {
        self.frames
    }
}
