use bevy::prelude::*;
use constants::effect_parameters::INTERACTIVE_INNER_RATIO;

use super::hash::{hash3, tumble};
use super::{SplatModifier, SplatPose, smoothstep};
use crate::engine::assets::splat_cloud::SplatPoint;

/// Grid cells near the camera stay assembled; distant cells drift apart,
/// tumble and shrink. Evaluated in object space.
#[derive(Debug, Clone, Copy)]
pub struct ProximityModifier {
    /// Camera position transformed into the object's local space.
    pub camera_position: Vec3,
    pub assembly_radius: f32,
    pub grid_size: f32,
}

impl ProximityModifier {
    /// 0 when the cell is within the inner radius, 1 beyond the assembly radius.
    pub fn separation(&self, cell_index: Vec3) -> f32 {
        let cell_min = cell_index * self.grid_size;
        let cell_max = cell_min + Vec3::splat(self.grid_size);
        let closest = self.camera_position.clamp(cell_min, cell_max);
        let distance = closest.distance(self.camera_position);
        smoothstep(
            self.assembly_radius * INTERACTIVE_INNER_RATIO,
            self.assembly_radius,
            distance,
        )
    }
}

impl SplatModifier for ProximityModifier {
    fn modify(&self, splat: &SplatPoint) -> SplatPose {
        let cell_index = (splat.center / self.grid_size).floor();
        let hash = hash3(cell_index);
        let cell_center = cell_index * self.grid_size + Vec3::splat(self.grid_size * 0.5);
        let separation = self.separation(cell_index);

        let offset = (hash - 0.5) * self.grid_size * 10.0 * separation;
        let angle = separation * hash.length() * 2.0 * 2.0;
        let cell_local = tumble(splat.center - cell_center, angle);
        let displacement = offset * separation * 10.0;

        SplatPose {
            center: cell_center + offset + cell_local + displacement,
            scales: splat.scales * (1.0 - separation),
            opacity: 1.0,
        }
    }
}
