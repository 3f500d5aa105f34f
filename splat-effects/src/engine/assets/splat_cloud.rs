use bevy::prelude::*;

/// One renderable Gaussian splat at rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplatPoint {
    /// Object-space centre.
    pub center: Vec3,
    /// Linear (already exponentiated) axis scales.
    pub scales: Vec3,
    /// Linear colour and opacity.
    pub rgba: [f32; 4],
    /// Position in the source file, used to key per-splat hashes.
    pub index: u32,
}

/// Rest pose of every splat in one loaded file. Never mutated after loading;
/// animated poses are written to the mesh instead.
#[derive(Asset, TypePath, Debug, Clone, Default)]
pub struct SplatCloud {
    pub splats: Vec<SplatPoint>,
}

impl SplatCloud {
    pub fn len(&self) -> usize {
        self.splats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splats.is_empty()
    }
}
