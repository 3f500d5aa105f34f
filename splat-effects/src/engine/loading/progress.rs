use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub urls_resolved: bool,
    pub splats_settled: bool,
    pub objects_created: bool,
}
