use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use bevy_web_asset::WebAssetPlugin;
use constants::camera::{INTERACTIVE_FAR, INTERACTIVE_FOV_DEGREES, INTERACTIVE_NEAR};
use constants::render_settings::CLEAR_COLOUR;

use crate::effects::CameraRig;
// Crate engine modules
use crate::engine::assets::asset_manifest::AssetManifest;
use crate::engine::assets::splat_cloud::SplatCloud;
use crate::engine::assets::splat_loader::SplatCloudLoader;
use crate::engine::camera::free_look::{FreeLookCamera, free_look_controller};
use crate::engine::camera::orbit::{OrbitCamera, orbit_camera_system};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::config::EffectsConfig;
use crate::engine::core::window_config::create_window_config;
// Loading
use crate::engine::loading::manifest_loader::{ManifestLoader, resolve_splat_urls, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::splat_object_creator::create_splat_objects_when_ready;
use crate::engine::loading::splat_sources::{SplatSources, check_splat_loading};
// Runtime
use crate::engine::systems::fps_tracking::fps_log_system;
use crate::engine::systems::parameter_controls::parameter_controls_system;
use crate::engine::systems::scene_driver::{
    EffectClock, SceneObjects, advance_effect_clock, apply_splat_transitions, spin_splat_objects,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::{FpsText, ParametersText};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, parameters_text_update_system};

pub fn create_app(config: EffectsConfig) -> App {
    let mut app = App::new();
    let rig = config.effect.camera_rig();

    // http(s) asset sources must exist before the AssetPlugin builds.
    app.add_plugins(WebAssetPlugin::default())
        .add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers AssetManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<AssetManifest>::new(&["json"]))
        .init_asset::<SplatCloud>()
        .init_asset_loader::<SplatCloudLoader>()
        .insert_resource(ClearColor(Color::srgb(
            CLEAR_COLOUR[0],
            CLEAR_COLOUR[1],
            CLEAR_COLOUR[2],
        )));

    // Initialise resources early
    app.insert_resource(config.effect.default_parameters())
        .insert_resource(config)
        .init_resource::<EffectClock>()
        .init_resource::<SceneObjects>()
        .init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<SplatSources>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                resolve_splat_urls,
                check_splat_loading,
                create_splat_objects_when_ready,
                transition_to_running,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    // Runtime systems - only run when everything is ready
    app.add_systems(
        Update,
        (
            parameter_controls_system,
            advance_effect_clock,
            spin_splat_objects,
            apply_splat_transitions,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(Update, fps_log_system);

    match rig {
        CameraRig::Orbit => {
            app.init_resource::<OrbitCamera>().add_systems(
                Update,
                orbit_camera_system
                    .before(apply_splat_transitions)
                    .run_if(in_state(AppState::Running)),
            );
        }
        CameraRig::FreeLook => {
            app.add_systems(
                Update,
                free_look_controller
                    .before(apply_splat_transitions)
                    .run_if(in_state(AppState::Running)),
            );
        }
        CameraRig::Fixed => {}
    }

    // Add overlay text systems only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (fps_text_update_system, parameters_text_update_system),
        );
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands, config: Res<EffectsConfig>) {
    println!("=== SPLAT EFFECTS: {} ===", config.effect.name());
    spawn_camera(&mut commands, &config);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

fn spawn_camera(commands: &mut Commands, config: &EffectsConfig) {
    let start = config.effect.camera_start();

    match config.effect.camera_rig() {
        CameraRig::Orbit | CameraRig::Fixed => {
            commands.spawn((Camera3d::default(), start));
        }
        CameraRig::FreeLook => {
            let free_look = FreeLookCamera::new(start.translation);
            commands.spawn((
                Camera3d::default(),
                Projection::from(PerspectiveProjection {
                    fov: INTERACTIVE_FOV_DEGREES.to_radians(),
                    near: INTERACTIVE_NEAR,
                    far: INTERACTIVE_FAR,
                    ..default()
                }),
                free_look.transform(),
            ));
            commands.insert_resource(free_look);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    let font = TextFont {
        font_size: constants::render_settings::OVERLAY_FONT_SIZE,
        ..default()
    };

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                font.clone(),
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
            parent.spawn((
                Text::new(""),
                font,
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                ParametersText,
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
