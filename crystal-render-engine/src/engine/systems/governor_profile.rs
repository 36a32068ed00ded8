use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::lod::governor::PerformanceGovernor;
use crate::engine::lod::settings::AutoFpsSettings;
use crate::engine::lod::tuning::GovernorProfile;

const GOVERNOR_PROFILE_PATH: &str = "lod/governor.tuning.json";

#[derive(Resource, Default)]
pub struct GovernorProfileLoader {
    handle: Option<Handle<GovernorProfile>>,
    applied: bool,
}

/// Registers the profile asset type and applies the profile once it loads.
/// A missing profile leaves the compiled-in defaults in place.
pub struct GovernorProfilePlugin;

impl Plugin for GovernorProfilePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(JsonAssetPlugin::<GovernorProfile>::new(&["tuning.json"]))
            .init_resource::<GovernorProfileLoader>()
            .add_systems(Startup, start_profile_loading)
            .add_systems(Update, apply_governor_profile);
    }
}

fn start_profile_loading(
    mut loader: ResMut<GovernorProfileLoader>,
    asset_server: Res<AssetServer>,
) {
    info!("Loading governor profile from: {}", GOVERNOR_PROFILE_PATH);
    loader.handle = Some(asset_server.load(GOVERNOR_PROFILE_PATH));
}

fn apply_governor_profile(
    mut loader: ResMut<GovernorProfileLoader>,
    profiles: Res<Assets<GovernorProfile>>,
    mut governor: ResMut<PerformanceGovernor>,
    mut settings: ResMut<AutoFpsSettings>,
) {
    if loader.applied {
        return;
    }
    let Some(profile) = loader.handle.as_ref().and_then(|handle| profiles.get(handle)) else {
        return;
    };

    match profile.tuning.validate() {
        Ok(()) => {
            governor.set_tuning(profile.tuning.clone());
            info!("Governor tuning applied");
        }
        Err(err) => warn!("Ignoring governor tuning, keeping defaults: {}", err),
    }

    let target = settings.set_target_fps(profile.target_fps);
    settings.set_auto_enabled(profile.auto_enabled);
    info!(
        "Governor profile loaded: target={} auto={}",
        target, profile.auto_enabled
    );

    loader.applied = true;
}
