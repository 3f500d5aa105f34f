use bevy::math::Vec3;

/// Radians of yaw/pitch per pixel of pointer motion.
pub const MOUSE_SENSITIVITY: f32 = 0.002;

/// Fixed per-frame translation step for WASD movement.
pub const MOVE_STEP: f32 = 0.01;

/// Pitch is clamped to ±PITCH_LIMIT radians.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2;

/// Orbit camera circle used by the assembly effect.
pub const ORBIT_RADIUS: f32 = 9.0;
pub const ORBIT_HEIGHT: f32 = 2.2;
pub const ORBIT_LOOK_AT: Vec3 = Vec3::new(0.0, -1.5, 0.0);

/// Orbit angular rate relative to the effect speed multiplier.
pub const ORBIT_RATE: f32 = 0.5;

/// Starting camera poses (position, look-at) per effect.
pub const ASSEMBLY_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.2, 9.0);
pub const MORPH_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.2, 6.5);
pub const BASELINE_LOOK_AT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Perspective used by the free-look interactive scene.
pub const INTERACTIVE_FOV_DEGREES: f32 = 100.0;
pub const INTERACTIVE_NEAR: f32 = 0.1;
pub const INTERACTIVE_FAR: f32 = 1000.0;
