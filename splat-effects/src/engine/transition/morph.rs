use bevy::prelude::*;
use constants::effect_parameters::{
    MORPH_BASE_HEIGHT, MORPH_FLATTEN, MORPH_SCATTER_MIX, MORPH_SCATTER_SCALE,
};

use super::hash::hash3_from_index;
use super::{ObjectRole, SplatModifier, SplatPose, TransitionHalf, TransitionState};
use crate::engine::assets::splat_cloud::SplatPoint;

/// Shrinks each splat into a flattened cloud around the scene centre and
/// regrows the next object out of the same cloud.
#[derive(Debug, Clone, Copy)]
pub struct MorphModifier {
    pub state: TransitionState,
    pub object_index: usize,
    pub random_radius: f32,
    pub object_rotation: Quat,
}

/// Uniform point inside a sphere of `radius`, squashed vertically.
/// Keyed on the splat index so equal indices of different objects meet.
pub fn scatter_in_sphere(splat_index: u32, radius: f32) -> Vec3 {
    let h = hash3_from_index(splat_index);
    let theta = std::f32::consts::TAU * h.x;
    let phi = (2.0 * h.y - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * h.z.cbrt();

    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * phi.cos() * MORPH_FLATTEN,
        r * sin_phi * theta.sin(),
    )
}

impl MorphModifier {
    /// Scatter point for a splat, turned with the object and pulled towards
    /// the world centre.
    pub fn scatter_target(&self, splat_index: u32) -> Vec3 {
        let mut target = self.object_rotation * scatter_in_sphere(splat_index, self.random_radius);
        target.y += MORPH_BASE_HEIGHT;
        let world_center = Vec3::new(0.0, MORPH_BASE_HEIGHT, 0.0);
        world_center.lerp(target, MORPH_SCATTER_MIX)
    }
}

impl SplatModifier for MorphModifier {
    fn modify(&self, splat: &SplatPoint) -> SplatPose {
        let role = self.state.role_of(self.object_index);
        if role == ObjectRole::Idle {
            return SplatPose::hidden_at(splat.center, splat.scales);
        }

        let scatter = self.scatter_target(splat.index);
        let small = Vec3::splat(MORPH_SCATTER_SCALE);
        let ease = self.state.eased_half_progress();

        match (role, self.state.in_transition, self.state.half()) {
            (ObjectRole::Current, false, _) => SplatPose::rest(splat),
            (ObjectRole::Current, true, TransitionHalf::Disassembly) => SplatPose {
                center: splat.center.lerp(scatter, ease),
                scales: splat.scales.lerp(small, ease),
                opacity: 1.0 - ease * 0.5,
            },
            (ObjectRole::Next, true, TransitionHalf::Reassembly) => SplatPose {
                center: scatter.lerp(splat.center, ease),
                scales: small.lerp(splat.scales, ease),
                opacity: 1.0,
            },
            _ => SplatPose::hidden_at(scatter, small),
        }
    }
}
