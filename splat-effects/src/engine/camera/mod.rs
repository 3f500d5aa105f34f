//! Camera controllers for the splat scenes.
//!
//! Free-look pointer and WASD navigation for the interactive scene, and an
//! orbit rig that circles the objects in the assembly scene.

/// Pointer drag / pointer lock look controls with WASD movement.
pub mod free_look;

/// Orbit rig circling the scene while rotation is enabled.
pub mod orbit;
