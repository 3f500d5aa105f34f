//! Shared constants for the splat effects.
//!
//! Defaults and slider ranges for effect parameters, camera tuning values,
//! asset paths and render settings.

/// Camera baselines, sensitivities and orbit tuning.
pub mod camera;

/// Default values and adjustment ranges for every effect parameter.
pub mod effect_parameters;

/// Asset manifest and local asset directory layout.
pub mod paths;

/// Clear colour, splat point material and overlay settings.
pub mod render_settings;
