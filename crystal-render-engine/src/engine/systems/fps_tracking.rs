use bevy::prelude::*;

use crate::engine::lod::frame_timer::{FpsSample, FrameTimer};
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Component)]
pub struct FpsText;

/// Most recent FPS sample, for readouts and RPC queries.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FpsReadout {
    pub last: Option<f32>,
}

/// Feed the frame timer once per frame from the real-time clock.
pub fn track_frame_timing(
    time: Res<Time<Real>>,
    mut timer: ResMut<FrameTimer>,
    mut samples: EventWriter<FpsSample>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    if let Some(sample) = timer.record_frame(now_ms) {
        samples.write(sample);
    }
}

pub fn fps_notification_system(
    mut samples: EventReader<FpsSample>,
    mut readout: ResMut<FpsReadout>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for sample in samples.read() {
        readout.last = Some(sample.fps);
        rpc_interface.send_notification(
            "fps_update",
            serde_json::json!({
                "fps": sample.fps
            }),
        );
    }
}

pub fn fps_text_update_system(
    readout: Res<FpsReadout>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    if !readout.is_changed() {
        return;
    }
    let Some(value) = readout.last else {
        return;
    };
    for mut text in &mut query {
        text.0 = format!("FPS: {value:.0}");
    }
}
