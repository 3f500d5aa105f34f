/// Inclusive adjustment range with the increment used by the keyboard panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParameterRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const SPEED_RANGE: ParameterRange = ParameterRange::new(0.1, 3.0, 0.01);
pub const STAY_RANGE: ParameterRange = ParameterRange::new(0.2, 5.0, 0.05);
pub const TRANSITION_RANGE: ParameterRange = ParameterRange::new(1.0, 3.0, 0.05);
pub const SCATTER_RADIUS_RANGE: ParameterRange = ParameterRange::new(1.0, 8.0, 0.1);
pub const GRID_SIZE_RANGE: ParameterRange = ParameterRange::new(0.25, 1.5, 0.05);

/// Keyboard speed changes move in coarser steps than the slider resolution.
pub const SPEED_KEY_STEP: f32 = 0.1;

pub const DEFAULT_SPEED: f32 = 1.0;

pub const ASSEMBLY_STAY_SECONDS: f32 = 2.0;
pub const ASSEMBLY_TRANSITION_SECONDS: f32 = 4.0;
pub const ASSEMBLY_SCATTER_RADIUS: f32 = 3.0;
pub const ASSEMBLY_GRID_SIZE: f32 = 0.75;

pub const MORPH_STAY_SECONDS: f32 = 1.5;
pub const MORPH_TRANSITION_SECONDS: f32 = 2.0;
pub const MORPH_RANDOM_RADIUS: f32 = 3.0;

/// Splat scale both morph phases shrink towards.
pub const MORPH_SCATTER_SCALE: f32 = 0.03;
/// Height the scatter cloud is lifted by and its vertical squash factor.
pub const MORPH_BASE_HEIGHT: f32 = 0.5;
pub const MORPH_FLATTEN: f32 = 0.3;
/// Fraction of the way from the world centre to the scatter point.
pub const MORPH_SCATTER_MIX: f32 = 0.7;

pub const INTERACTIVE_ASSEMBLY_RADIUS: f32 = 7.0;
pub const INTERACTIVE_GRID_SIZE: f32 = 0.25;
/// Inner radius of the separation ramp as a fraction of the assembly radius.
pub const INTERACTIVE_INNER_RATIO: f32 = 0.4;
