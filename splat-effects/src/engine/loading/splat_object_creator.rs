use bevy::prelude::*;

use crate::engine::assets::splat_cloud::SplatCloud;
use crate::engine::core::config::EffectsConfig;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::splat_sources::SplatSources;
use crate::engine::mesh::splat_mesh::{create_splat_material, create_splat_mesh};
use crate::engine::systems::scene_driver::{SceneObjects, Spinning, SplatObject};
use crate::effects::EffectKind;

pub fn create_splat_objects_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<EffectsConfig>,
    sources: Res<SplatSources>,
    clouds: Res<Assets<SplatCloud>>,
) {
    if loading_progress.objects_created || !loading_progress.splats_settled {
        return;
    }

    // One material for every object; opacity lives in the vertex colours.
    let material = materials.add(create_splat_material());
    let placement = config.effect.object_placement();
    let mut spawned = 0;

    for (object_index, source) in sources.loaded() {
        let Some(cloud) = source.handle.as_ref().and_then(|handle| clouds.get(handle)) else {
            continue;
        };
        if cloud.is_empty() {
            warn!("Splat file {} has no splats, skipping", source.name);
            continue;
        }
        let Some(handle) = source.handle.clone() else {
            continue;
        };

        let mut entity = commands.spawn((
            Mesh3d(meshes.add(create_splat_mesh(cloud))),
            MeshMaterial3d(material.clone()),
            placement,
            SplatObject {
                object_index,
                cloud: handle,
            },
            // Animated positions leave the rest-pose bounds.
            bevy::render::view::NoFrustumCulling,
        ));
        if config.effect == EffectKind::Morph {
            entity.insert(Spinning);
        }

        println!(
            "Splat object {object_index} ({}) spawned with {} splats",
            source.name,
            cloud.len()
        );
        spawned += 1;
    }

    commands.insert_resource(SceneObjects {
        count: sources.sources.len(),
    });
    loading_progress.objects_created = true;
    println!(
        "{spawned} of {} splat objects ready for the {} effect",
        sources.sources.len(),
        config.effect.name()
    );
}
