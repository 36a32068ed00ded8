use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;

use crate::engine::core::window_config::create_window_config;
use crate::engine::geometry::lattice::CrystalLattice;
use crate::engine::geometry::seeds::CrystalGeometry;
use crate::engine::lod::parameters::LodParameters;
use crate::engine::render::crystal_gizmos::draw_crystal_views;
use crate::engine::systems::governor_profile::GovernorProfilePlugin;
use crate::engine::systems::lod_governor::LodGovernorPlugin;
use crate::engine::views::{CrystalView, ViewSlot};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{FpsText, fps_text_update_system};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::lod_governor::lod_keyboard_system;

const DEMO_LATTICE_CELLS: u32 = 12;
const DEMO_LATTICE_SPACING: f32 = 1.0;
const MAIN_GEOMETRY_SEED: u64 = 0x5eed_0001;
const COMPARE_GEOMETRY_SEED: u64 = 0x5eed_0002;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(LodGovernorPlugin)
        .add_plugins(GovernorProfilePlugin)
        .add_plugins(WebRpcPlugin)
        .add_systems(Startup, setup)
        // Draw after the LOD chain has smoothed this frame's uniforms.
        .add_systems(PostUpdate, draw_crystal_views);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, (lod_keyboard_system, fps_text_update_system));
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

/// Main and comparison views over the same lattice. The comparison camera
/// starts inactive but still receives every uniform update.
fn spawn_crystal_views(commands: &mut Commands, params: &LodParameters) {
    let lattice = CrystalLattice::cubic(DEMO_LATTICE_CELLS, DEMO_LATTICE_SPACING);

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-9.0, 7.5, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
        CrystalView::new(ViewSlot::Main, params),
        CrystalGeometry::build(&lattice.positions, &lattice.edges, MAIN_GEOMETRY_SEED),
    ));

    commands.spawn((
        Camera3d::default(),
        Camera {
            order: 1,
            is_active: false,
            ..default()
        },
        Transform::from_xyz(9.0, 7.5, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
        CrystalView::new(ViewSlot::Compare, params),
        CrystalGeometry::build(&lattice.positions, &lattice.edges, COMPARE_GEOMETRY_SEED),
    ));

    info!(
        "Spawned crystal views: {} nodes, {} edges",
        lattice.positions.len(),
        lattice.edges.len()
    );
}

fn setup(mut commands: Commands, params: Res<LodParameters>) {
    spawn_lighting(&mut commands);
    spawn_crystal_views(&mut commands, &params);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.0, 0.95, 1.0)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
