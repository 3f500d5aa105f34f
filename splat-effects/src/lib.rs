//! Real-time Gaussian splat effects.
//!
//! Splat objects cycle through grid disassembly, scatter-and-reform morphs or
//! camera-proximity separation, evaluated per splat every frame.

pub mod effects;
pub mod engine;
