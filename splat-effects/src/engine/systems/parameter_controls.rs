use bevy::prelude::*;
use constants::effect_parameters::{
    GRID_SIZE_RANGE, SCATTER_RADIUS_RANGE, SPEED_KEY_STEP, STAY_RANGE, TRANSITION_RANGE,
};

use crate::effects::EffectKind;
use crate::effects::parameters::EffectParameters;
use crate::engine::core::config::EffectsConfig;

/// A single adjustment requested from the keyboard panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterAdjustment {
    TogglePause,
    ToggleRotation,
    Speed(f32),
    Stay(f32),
    Transition(f32),
    /// Scatter radius for assembly, random radius for morph.
    Radius(f32),
    GridSize(f32),
}

impl ParameterAdjustment {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        let adjustment = match key {
            KeyCode::Space => Self::TogglePause,
            KeyCode::KeyR => Self::ToggleRotation,
            KeyCode::Minus => Self::Speed(-SPEED_KEY_STEP),
            KeyCode::Equal => Self::Speed(SPEED_KEY_STEP),
            KeyCode::Digit1 => Self::Stay(-STAY_RANGE.step),
            KeyCode::Digit2 => Self::Stay(STAY_RANGE.step),
            KeyCode::Digit3 => Self::Transition(-TRANSITION_RANGE.step),
            KeyCode::Digit4 => Self::Transition(TRANSITION_RANGE.step),
            KeyCode::Digit5 => Self::Radius(-SCATTER_RADIUS_RANGE.step),
            KeyCode::Digit6 => Self::Radius(SCATTER_RADIUS_RANGE.step),
            KeyCode::Digit7 => Self::GridSize(-GRID_SIZE_RANGE.step),
            KeyCode::Digit8 => Self::GridSize(GRID_SIZE_RANGE.step),
            _ => return None,
        };
        Some(adjustment)
    }

    /// Applies the adjustment and returns a log line describing the result.
    pub fn apply(self, params: &mut EffectParameters, effect: EffectKind) -> String {
        match self {
            Self::TogglePause => {
                let paused = !params.pause();
                params.set_pause(paused);
                format!("Pause: {paused}")
            }
            Self::ToggleRotation => {
                let rotating = !params.rotation();
                params.set_rotation(rotating);
                format!("Rotation: {rotating}")
            }
            Self::Speed(delta) => {
                let speed = params.set_speed_multiplier(params.speed_multiplier() + delta);
                format!("Speed multiplier: {speed:.2}")
            }
            Self::Stay(delta) => {
                let stay = params.set_stay_seconds(params.stay_seconds() + delta);
                format!("Stay: {stay:.2}s")
            }
            Self::Transition(delta) => {
                let transition = params.set_transition_seconds(params.transition_seconds() + delta);
                format!("Transition: {transition:.2}s")
            }
            Self::Radius(delta) if effect == EffectKind::Morph => {
                let radius = params.set_random_radius(params.random_radius() + delta);
                format!("Random radius: {radius:.1}")
            }
            Self::Radius(delta) => {
                let radius = params.set_scatter_radius(params.scatter_radius() + delta);
                format!("Scatter radius: {radius:.1}")
            }
            Self::GridSize(delta) => {
                let grid = params.set_grid_size(params.grid_size() + delta);
                format!("Grid size: {grid:.2}")
            }
        }
    }
}

/// Keyboard panel for the live effect parameters. Change detection on
/// `EffectParameters` only fires when a key was actually handled.
pub fn parameter_controls_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<EffectsConfig>,
    mut params: ResMut<EffectParameters>,
) {
    for key in keyboard.get_just_pressed() {
        let Some(adjustment) = ParameterAdjustment::from_key(*key) else {
            continue;
        };
        let message = adjustment.apply(&mut params, config.effect);
        info!("{message}");
    }
}
