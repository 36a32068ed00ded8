use bevy::prelude::*;
use constants::render_settings::{UNIFORM_SMOOTHING, UNIFORM_SNAP_EPSILON};

use crate::engine::geometry::seeds::CrystalGeometry;
use crate::engine::lod::frame_timer::{FpsSample, FrameTimer};
use crate::engine::lod::governor::{GovernorDecision, PerformanceGovernor};
use crate::engine::lod::parameters::LodParameters;
use crate::engine::lod::settings::AutoFpsSettings;
use crate::engine::systems::fps_tracking::{
    FpsReadout, fps_notification_system, track_frame_timing,
};
use crate::engine::views::CrystalView;
use crate::rpc::web_rpc::WebRpcInterface;

/// Sent whenever a governor step changed the LOD surface.
#[derive(Event, Debug, Clone, Copy)]
pub struct LodAdjusted {
    pub fps: f32,
    pub decision: GovernorDecision,
}

/// Frame timer, governor, view propagation and frontend notifications,
/// chained so every view sees a governor step in the same frame.
pub struct LodGovernorPlugin;

impl Plugin for LodGovernorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameTimer>()
            .init_resource::<FpsReadout>()
            .init_resource::<LodParameters>()
            .init_resource::<AutoFpsSettings>()
            .init_resource::<PerformanceGovernor>()
            .init_resource::<WebRpcInterface>()
            .add_event::<FpsSample>()
            .add_event::<LodAdjusted>()
            .add_systems(
                Update,
                (
                    track_frame_timing,
                    fps_notification_system,
                    run_performance_governor,
                    propagate_lod_to_views,
                    smooth_view_uniforms,
                    lod_change_notification_system,
                )
                    .chain(),
            );
    }
}

/// Step the governor once per FPS sample while auto mode is on.
pub fn run_performance_governor(
    mut samples: EventReader<FpsSample>,
    settings: Res<AutoFpsSettings>,
    mut governor: ResMut<PerformanceGovernor>,
    params: Option<ResMut<LodParameters>>,
    mut adjusted: EventWriter<LodAdjusted>,
) {
    let Some(mut params) = params else {
        samples.clear();
        return;
    };

    for sample in samples.read() {
        if !settings.auto_enabled() {
            continue;
        }

        // Work on a copy so change detection only fires on real writes.
        let mut surface = *params;
        let decision = governor.step(sample.fps, settings.target_fps(), &mut surface);
        debug!("Governor fps={:.1} -> {:?}", sample.fps, decision);

        if decision.changed_surface() {
            *params = surface;
            adjusted.write(LodAdjusted {
                fps: sample.fps,
                decision,
            });
        }
    }
}

/// Push the surface to every view whenever it changes, from the governor or an operator.
pub fn propagate_lod_to_views(
    params: Option<Res<LodParameters>>,
    mut views: Query<&mut CrystalView>,
) {
    let Some(params) = params else {
        return;
    };
    if !params.is_changed() {
        return;
    }
    for mut view in &mut views {
        view.retarget(&params);
    }
}

/// Ease every view toward its target, snapping once the gap is negligible.
pub fn smooth_view_uniforms(mut views: Query<&mut CrystalView>) {
    for mut view in &mut views {
        let target = view.target;
        let gap = view.current.max_difference(&target);
        if gap == 0.0 {
            continue;
        }
        if gap < UNIFORM_SNAP_EPSILON {
            view.current = target;
        } else {
            view.current.approach(&target, UNIFORM_SMOOTHING);
        }
    }
}

pub fn lod_change_notification_system(
    mut adjusted: EventReader<LodAdjusted>,
    params: Option<Res<LodParameters>>,
    views: Query<(&CrystalView, Option<&CrystalGeometry>)>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    // Several steps in one frame collapse into one notification of the final state.
    let Some(last) = adjusted.read().last().copied() else {
        return;
    };
    let Some(params) = params else {
        return;
    };

    let view_counts: Vec<serde_json::Value> = views
        .iter()
        .filter_map(|(view, geometry)| {
            geometry.map(|geometry| {
                serde_json::json!({
                    "slot": view.slot,
                    "counts": geometry.visible_counts(&view.target),
                })
            })
        })
        .collect();

    rpc_interface.send_notification(
        "lod_params_changed",
        serde_json::json!({
            "source": "governor",
            "fps": last.fps,
            "decision": format!("{:?}", last.decision),
            "params": params.to_json(),
            "views": view_counts,
        }),
    );
}

/// Native keyboard overrides: F toggles auto mode, =/- nudge the target.
#[cfg(not(target_arch = "wasm32"))]
pub fn lod_keyboard_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<AutoFpsSettings>,
) {
    if keyboard.just_pressed(KeyCode::KeyF) {
        let enabled = !settings.auto_enabled();
        settings.set_auto_enabled(enabled);
        info!("Auto FPS {}", if enabled { "enabled" } else { "disabled" });
    }

    let nudge = if keyboard.just_pressed(KeyCode::Equal) {
        1.0
    } else if keyboard.just_pressed(KeyCode::Minus) {
        -1.0
    } else {
        return;
    };

    let target = settings.target_fps() + nudge;
    let applied = settings.set_target_fps(target);
    info!("Target FPS: {}", applied);
}
