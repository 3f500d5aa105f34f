use bevy::math::Affine3A;
use bevy::prelude::*;

use crate::effects::EffectKind;
use crate::effects::parameters::EffectParameters;
use crate::engine::assets::splat_cloud::{SplatCloud, SplatPoint};
use crate::engine::core::config::EffectsConfig;
use crate::engine::transition::assembly::AssemblyModifier;
use crate::engine::transition::morph::MorphModifier;
use crate::engine::transition::proximity::ProximityModifier;
use crate::engine::transition::{SplatModifier, SplatPose, TransitionTimeline};

/// Effect time in seconds, scaled by the speed multiplier. Grows without
/// bound; the timeline wraps it.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct EffectClock {
    pub elapsed: f32,
}

impl EffectClock {
    pub fn advance(&mut self, delta_seconds: f32, params: &EffectParameters) {
        if params.pause() {
            return;
        }
        self.elapsed += delta_seconds * params.speed_multiplier();
    }
}

/// Number of objects the timeline cycles through. Objects whose file never
/// resolved or loaded still hold their slot.
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneObjects {
    pub count: usize,
}

/// One spawned splat mesh and the rest pose it is animated from.
#[derive(Component, Debug, Clone)]
pub struct SplatObject {
    pub object_index: usize,
    pub cloud: Handle<SplatCloud>,
}

/// Splat objects that turn about Y while rotation is on.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Spinning;

/// Coordinate space a modifier expects splat centres in.
#[derive(Debug, Clone, Copy)]
pub enum EvaluationSpace {
    Object,
    /// Carries the object-to-world transform.
    World(Affine3A),
}

/// Mesh attribute buffers for one evaluated cloud. Colour alpha already
/// includes [`point_coverage`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluatedSplats {
    pub positions: Vec<[f32; 3]>,
    pub colours: Vec<[f32; 4]>,
}

impl EvaluatedSplats {
    fn with_capacity(len: usize) -> Self {
        Self {
            positions: Vec::with_capacity(len),
            colours: Vec::with_capacity(len),
        }
    }

    fn push(&mut self, center: Vec3, pose: &SplatPose, splat: &SplatPoint) {
        let mut rgba = pose.rgba(splat);
        rgba[3] *= point_coverage(pose, splat);
        self.positions.push(center.to_array());
        self.colours.push(rgba);
    }
}

/// Share of a splat still drawn once posed. Points have no size, so the
/// posed scale relative to the rest scale fades the point instead; a splat
/// shrunk to zero does not render.
pub fn point_coverage(pose: &SplatPose, splat: &SplatPoint) -> f32 {
    let rest = splat.scales.max_element();
    if rest <= 0.0 {
        return 1.0;
    }
    (pose.scales.max_element() / rest).clamp(0.0, 1.0)
}

/// Runs `modifier` over every splat. Resulting positions are always in
/// object space, ready for the mesh.
pub fn evaluate_cloud<M: SplatModifier>(
    modifier: &M,
    cloud: &SplatCloud,
    space: EvaluationSpace,
) -> EvaluatedSplats {
    let mut evaluated = EvaluatedSplats::with_capacity(cloud.len());

    match space {
        EvaluationSpace::Object => {
            for splat in &cloud.splats {
                let pose = modifier.modify(splat);
                evaluated.push(pose.center, &pose, splat);
            }
        }
        EvaluationSpace::World(to_world) => {
            let to_object = to_world.inverse();
            for splat in &cloud.splats {
                let world_splat = SplatPoint {
                    center: to_world.transform_point3(splat.center),
                    ..*splat
                };
                let pose = modifier.modify(&world_splat);
                evaluated.push(to_object.transform_point3(pose.center), &pose, splat);
            }
        }
    }

    evaluated
}

pub fn advance_effect_clock(
    time: Res<Time>,
    params: Res<EffectParameters>,
    mut clock: ResMut<EffectClock>,
) {
    clock.advance(time.delta_secs(), &params);
}

pub fn spin_splat_objects(
    time: Res<Time>,
    params: Res<EffectParameters>,
    mut query: Query<&mut Transform, (With<SplatObject>, With<Spinning>)>,
) {
    if params.pause() || !params.rotation() {
        return;
    }

    let angle = time.delta_secs() * params.speed_multiplier();
    for mut transform in &mut query {
        transform.rotate_y(angle);
    }
}

/// Evaluates the active effect for every splat object and rewrites its mesh.
/// Splat objects and the camera are unparented, so their local `Transform`
/// is already the world pose written earlier this frame.
pub fn apply_splat_transitions(
    config: Res<EffectsConfig>,
    params: Res<EffectParameters>,
    clock: Res<EffectClock>,
    scene: Res<SceneObjects>,
    clouds: Res<Assets<SplatCloud>>,
    mut meshes: ResMut<Assets<Mesh>>,
    objects: Query<(&SplatObject, &Mesh3d, &Transform)>,
    camera_query: Query<&Transform, With<Camera3d>>,
) {
    let Some(timeline) = TransitionTimeline::new(
        params.stay_seconds(),
        params.transition_seconds(),
        scene.count,
    ) else {
        return;
    };
    let state = timeline.state_at(clock.elapsed);
    let camera_position = camera_query
        .single()
        .map(|camera| camera.translation)
        .unwrap_or(Vec3::ZERO);

    for (object, mesh_handle, transform) in &objects {
        let Some(cloud) = clouds.get(&object.cloud) else {
            continue;
        };
        let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
            continue;
        };

        let to_world = transform.compute_affine();
        let object_rotation = transform.rotation;

        let evaluated = match config.effect {
            EffectKind::Assembly => evaluate_cloud(
                &AssemblyModifier {
                    state,
                    object_index: object.object_index,
                    grid_size: params.grid_size(),
                    scatter_radius: params.scatter_radius(),
                    object_rotation,
                },
                cloud,
                EvaluationSpace::World(to_world),
            ),
            EffectKind::Morph => evaluate_cloud(
                &MorphModifier {
                    state,
                    object_index: object.object_index,
                    random_radius: params.random_radius(),
                    object_rotation,
                },
                cloud,
                EvaluationSpace::World(to_world),
            ),
            EffectKind::InteractiveAssembly => evaluate_cloud(
                &ProximityModifier {
                    camera_position: to_world.inverse().transform_point3(camera_position),
                    assembly_radius: params.assembly_radius(),
                    grid_size: params.grid_size(),
                },
                cloud,
                EvaluationSpace::Object,
            ),
        };

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, evaluated.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, evaluated.colours);
    }
}
