//! Asset loading and initialisation systems for splat scenes.
//!
//! Manages the loading pipeline from manifest resolution through splat file
//! loading to spawning the animated splat objects.

/// Asset manifest loading and splat URL resolution.
///
/// Starts loading every splat file that resolved to a URL.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Splat object entity creation once every splat file has settled.
pub mod splat_object_creator;

/// Load state tracking for the configured splat files.
pub mod splat_sources;
