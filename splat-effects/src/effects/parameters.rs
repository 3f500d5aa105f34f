use bevy::prelude::*;
use constants::effect_parameters::*;

/// Shared effect configuration. Writes go through setters that clamp to the
/// adjustment ranges; readers observe updates through `Res::is_changed`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EffectParameters {
    speed_multiplier: f32,
    rotation: bool,
    pause: bool,
    stay_seconds: f32,
    transition_seconds: f32,
    scatter_radius: f32,
    random_radius: f32,
    grid_size: f32,
    assembly_radius: f32,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self::assembly()
    }
}

impl EffectParameters {
    pub fn assembly() -> Self {
        Self {
            speed_multiplier: DEFAULT_SPEED,
            rotation: true,
            pause: false,
            stay_seconds: ASSEMBLY_STAY_SECONDS,
            transition_seconds: ASSEMBLY_TRANSITION_SECONDS,
            scatter_radius: ASSEMBLY_SCATTER_RADIUS,
            random_radius: MORPH_RANDOM_RADIUS,
            grid_size: ASSEMBLY_GRID_SIZE,
            assembly_radius: INTERACTIVE_ASSEMBLY_RADIUS,
        }
    }

    pub fn morph() -> Self {
        Self {
            stay_seconds: MORPH_STAY_SECONDS,
            transition_seconds: MORPH_TRANSITION_SECONDS,
            ..Self::assembly()
        }
    }

    pub fn interactive_assembly() -> Self {
        Self {
            grid_size: INTERACTIVE_GRID_SIZE,
            ..Self::assembly()
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn rotation(&self) -> bool {
        self.rotation
    }

    pub fn pause(&self) -> bool {
        self.pause
    }

    pub fn stay_seconds(&self) -> f32 {
        self.stay_seconds
    }

    pub fn transition_seconds(&self) -> f32 {
        self.transition_seconds
    }

    pub fn scatter_radius(&self) -> f32 {
        self.scatter_radius
    }

    pub fn random_radius(&self) -> f32 {
        self.random_radius
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn assembly_radius(&self) -> f32 {
        self.assembly_radius
    }

    /// Returns the value actually applied.
    pub fn set_speed_multiplier(&mut self, value: f32) -> f32 {
        self.speed_multiplier = SPEED_RANGE.clamp(value);
        self.speed_multiplier
    }

    pub fn set_rotation(&mut self, enabled: bool) {
        self.rotation = enabled;
    }

    pub fn set_pause(&mut self, paused: bool) {
        self.pause = paused;
    }

    pub fn set_stay_seconds(&mut self, value: f32) -> f32 {
        self.stay_seconds = STAY_RANGE.clamp(value);
        self.stay_seconds
    }

    pub fn set_transition_seconds(&mut self, value: f32) -> f32 {
        self.transition_seconds = TRANSITION_RANGE.clamp(value);
        self.transition_seconds
    }

    pub fn set_scatter_radius(&mut self, value: f32) -> f32 {
        self.scatter_radius = SCATTER_RADIUS_RANGE.clamp(value);
        self.scatter_radius
    }

    pub fn set_random_radius(&mut self, value: f32) -> f32 {
        self.random_radius = SCATTER_RADIUS_RANGE.clamp(value);
        self.random_radius
    }

    pub fn set_grid_size(&mut self, value: f32) -> f32 {
        self.grid_size = GRID_SIZE_RANGE.clamp(value);
        self.grid_size
    }

    /// One-line readout for the overlay and logs.
    pub fn summary(&self) -> String {
        format!(
            "speed {:.2}  rotation {}  pause {}  stay {:.2}s  transition {:.2}s  scatter {:.1}  radius {:.1}  grid {:.2}",
            self.speed_multiplier,
            on_off(self.rotation),
            on_off(self.pause),
            self.stay_seconds,
            self.transition_seconds,
            self.scatter_radius,
            self.random_radius,
            self.grid_size,
        )
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
