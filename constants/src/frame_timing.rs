/// Width of one frame bucket in milliseconds (one frame at 60Hz).
pub const FRAME_BUCKET_MS: f64 = 16.66;

/// Minimum window length before an FPS sample is emitted.
pub const FPS_WINDOW_MS: f64 = 250.0;
