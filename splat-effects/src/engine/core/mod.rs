//! Core application setup and state management.
//!
//! Handles application lifecycle, runtime configuration, window setup and
//! state transitions for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset types, the effect camera rig and the
/// loading and runtime schedules.
pub mod app_setup;

/// Application state machine and the loading to running transition.
pub mod app_state;

/// Effect selection and asset resolution options from CLI, environment or
/// page globals.
pub mod config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
