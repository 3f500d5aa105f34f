//! Asset types for splat scenes.
//!
//! Handles the shared asset manifest, decoded splat clouds and the
//! PLY/SPZ loader that feeds them to the asset server.

/// Asset manifest mapping splat file names to remote URLs and local mirrors.
pub mod asset_manifest;

/// Decoded rest pose of every splat in a file.
pub mod splat_cloud;

/// PLY decoding and asset loader registration for splat files.
pub mod splat_loader;

/// Gzip-compressed quantized splats.
pub mod spz;
