use bevy::prelude::*;
use constants::camera::{ORBIT_HEIGHT, ORBIT_LOOK_AT, ORBIT_RADIUS, ORBIT_RATE};

use crate::effects::parameters::EffectParameters;

/// Circles the scene at a fixed height, always looking at the same point.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub angle: f32,
    pub radius: f32,
    pub height: f32,
    pub look_at: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            angle: 0.0,
            radius: ORBIT_RADIUS,
            height: ORBIT_HEIGHT,
            look_at: ORBIT_LOOK_AT,
        }
    }
}

impl OrbitCamera {
    pub fn advance(&mut self, delta_seconds: f32, speed_multiplier: f32) {
        self.angle += delta_seconds * ORBIT_RATE * speed_multiplier;
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.radius,
            self.height,
            self.angle.sin() * self.radius,
        )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.look_at, Vec3::Y)
    }
}

/// Moves the orbit camera while rotation is enabled and the effect is running.
pub fn orbit_camera_system(
    time: Res<Time>,
    params: Res<EffectParameters>,
    mut orbit: ResMut<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    if params.pause() || !params.rotation() {
        return;
    }

    orbit.advance(time.delta_secs(), params.speed_multiplier());

    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = orbit.transform();
    }
}
