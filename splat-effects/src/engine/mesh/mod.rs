//! Mesh generation for splat objects.
//!
//! Each splat object is drawn as a point list whose positions and vertex
//! colours are rewritten by the scene driver every frame.

/// Point-list mesh and unlit blended material for one splat cloud.
pub mod splat_mesh;
