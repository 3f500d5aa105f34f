//! Per-frame runtime systems.
//!
//! Drives the effect clock and splat mesh updates, handles the keyboard
//! parameter panel and reports frame rate.

/// FPS logging and native overlay text.
pub mod fps_tracking;

/// Keyboard adjustments of the live effect parameters.
///
/// Every handled key is applied through the clamping setters and logged.
pub mod parameter_controls;

/// Effect clock, object spin and per-splat mesh evaluation.
///
/// Builds the active effect's modifier for each splat object every frame and
/// rewrites the mesh positions and colours from it.
pub mod scene_driver;
