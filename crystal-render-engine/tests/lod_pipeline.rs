use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use crystal_render_engine::engine::systems::fps_tracking::FpsReadout;
use crystal_render_engine::prelude::*;
use crystal_render_engine::rpc::web_rpc::{IncomingRpcMessage, WebRpcInterface, WebRpcPlugin};

// Headless app with the LOD chain and a fixed clock step.
fn build_app(frame: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LodGovernorPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame));
    app
}

fn spawn_views(app: &mut App) -> [Entity; 2] {
    let params = *app.world().resource::<LodParameters>();
    let main = app
        .world_mut()
        .spawn(CrystalView::new(ViewSlot::Main, &params))
        .id();
    let compare = app
        .world_mut()
        .spawn(CrystalView::new(ViewSlot::Compare, &params))
        .id();
    [main, compare]
}

fn view(app: &App, entity: Entity) -> &CrystalView {
    app.world()
        .get::<CrystalView>(entity)
        .expect("view entity exists")
}

fn notifications<'a>(app: &'a App, method: &'a str) -> impl Iterator<Item = &'a serde_json::Value> {
    app.world()
        .resource::<WebRpcInterface>()
        .pending_notifications()
        .iter()
        .filter(move |n| n.method == method)
        .map(|n| &n.params)
}

#[test]
fn frame_timer_emits_samples_from_the_real_clock() {
    let mut app = build_app(Duration::from_millis(20));

    for _ in 0..20 {
        app.update();
    }

    let fps = app
        .world()
        .resource::<FpsReadout>()
        .last
        .expect("a sample after 400ms");
    assert!((fps - 50.0).abs() < 0.5, "read {fps}");
    assert_eq!(notifications(&app, "fps_update").count(), 1);

    // 50 fps sits above the target, so the governor only debounces.
    assert_eq!(
        *app.world().resource::<LodParameters>(),
        LodParameters::default()
    );
}

#[test]
fn stalled_clock_produces_no_samples() {
    let mut app = build_app(Duration::ZERO);

    for _ in 0..30 {
        app.update();
    }

    assert!(app.world().resource::<FpsReadout>().last.is_none());
    assert_eq!(notifications(&app, "fps_update").count(), 0);
}

#[test]
fn governor_step_reaches_every_view_in_the_same_update() {
    let mut app = build_app(Duration::ZERO);
    let [main, compare] = spawn_views(&mut app);
    app.update();

    app.world_mut().send_event(FpsSample { fps: 12.0 });
    app.update();

    let params = *app.world().resource::<LodParameters>();
    assert_eq!(params.xor_density(), 95.0);

    let expected = LodUniforms::from_parameters(&params);
    assert_eq!(view(&app, main).target, expected);
    assert_eq!(view(&app, compare).target, expected);
    assert_eq!(view(&app, main).current, view(&app, compare).current);

    let changed: Vec<_> = notifications(&app, "lod_params_changed").collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0]["source"], "governor");
    assert_eq!(changed[0]["params"]["xorDensity"], 95.0);
}

#[test]
fn disabled_auto_mode_leaves_the_surface_alone() {
    let mut app = build_app(Duration::ZERO);
    app.world_mut()
        .resource_mut::<AutoFpsSettings>()
        .set_auto_enabled(false);
    app.update();

    for _ in 0..10 {
        app.world_mut().send_event(FpsSample { fps: 5.0 });
        app.update();
    }

    assert_eq!(
        *app.world().resource::<LodParameters>(),
        LodParameters::default()
    );
    assert_eq!(notifications(&app, "lod_params_changed").count(), 0);
    assert_eq!(app.world().resource::<PerformanceGovernor>().highlight_delay(), 0);
}

#[test]
fn view_uniforms_ease_toward_operator_override() {
    let mut app = build_app(Duration::ZERO);
    let [main, _] = spawn_views(&mut app);
    app.update();

    app.world_mut()
        .resource_mut::<LodParameters>()
        .set_value(LodParam::NodeDensity, 50.0);
    app.update();

    let first = view(&app, main);
    assert_eq!(first.target.node_density, 0.5);
    assert!(first.current.node_density < 1.0 && first.current.node_density > 0.5);

    for _ in 0..60 {
        app.update();
    }
    let settled = view(&app, main);
    assert_eq!(settled.current, settled.target);
}

#[test]
fn rpc_override_is_clamped_and_propagated() {
    let mut app = build_app(Duration::ZERO);
    app.add_plugins(WebRpcPlugin);
    let [main, _] = spawn_views(&mut app);
    app.update();

    app.world_mut().send_event(IncomingRpcMessage {
        content: r#"{"jsonrpc":"2.0","method":"set_lod_param","params":{"key":"lineDensity","value":2},"id":7}"#
            .to_string(),
    });
    app.update();
    app.update();

    assert_eq!(app.world().resource::<LodParameters>().line_density(), 10.0);
    assert_eq!(view(&app, main).target.line_density, 0.1);
}
