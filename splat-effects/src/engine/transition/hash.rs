use bevy::prelude::*;

const HASH_SCALE: f32 = 43758.5453;
const HASH_DOT: Vec3 = Vec3::new(127.1, 311.7, 74.7);

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn fract3(v: Vec3) -> Vec3 {
    v - v.floor()
}

/// Scalar hash of a position, in [0, 1).
pub fn hash_f(p: Vec3) -> f32 {
    fract(p.dot(HASH_DOT).sin() * HASH_SCALE)
}

/// Three decorrelated scalar hashes of a grid cell.
pub fn hash3(p: Vec3) -> Vec3 {
    Vec3::new(
        hash_f(p),
        hash_f(p + Vec3::X),
        hash_f(p + Vec3::Y),
    )
}

/// Per-index hash used to place a splat inside the morph scatter sphere.
pub fn hash3_from_index(n: u32) -> Vec3 {
    let x = n as f32;
    fract3(Vec3::new(x, x + 1.0, x + 2.0).map(f32::sin) * HASH_SCALE)
}

/// Rotates `(a, b)` counter-clockwise by `angle`, as `v *= rot(angle)` in GLSL.
pub fn rotate_pair(a: f32, b: f32, angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    (a * c - b * s, a * s + b * c)
}

/// Per-cell tumble: rotate in the XY plane by 0.7·angle, then XZ by 0.5·angle.
pub fn tumble(v: Vec3, angle: f32) -> Vec3 {
    let (x, y) = rotate_pair(v.x, v.y, angle * 0.7);
    let (x, z) = rotate_pair(x, v.z, angle * 0.5);
    Vec3::new(x, y, z)
}
