use bevy::prelude::*;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

use crate::engine::assets::splat_cloud::SplatCloud;

/// Create a point-list mesh holding the rest pose of every splat.
/// Kept in the main world as well, since attributes are rewritten each frame.
pub fn create_splat_mesh(cloud: &SplatCloud) -> Mesh {
    let positions: Vec<[f32; 3]> = cloud.splats.iter().map(|s| s.center.to_array()).collect();
    let colours: Vec<[f32; 4]> = cloud.splats.iter().map(|s| s.rgba).collect();

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colours)
}

/// Vertex colours carry the splat colour and animated opacity, so the
/// material only has to be unlit and alpha blended.
pub fn create_splat_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}
