use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::render_settings::FPS_LOG_INTERVAL;

use crate::effects::parameters::EffectParameters;
use crate::engine::core::app_state::{FpsText, ParametersText};

fn smoothed_fps(diagnostics: &DiagnosticsStore) -> Option<f64> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
}

pub fn fps_log_system(
    diagnostics: Res<DiagnosticsStore>,
    mut last_log_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();
    if current_time - *last_log_time < FPS_LOG_INTERVAL {
        return;
    }

    if let Some(value) = smoothed_fps(&diagnostics) {
        info!("FPS: {value:.1}");
        *last_log_time = current_time;
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let Some(value) = smoothed_fps(&diagnostics) else {
        return;
    };
    for mut text in &mut query {
        text.0 = format!("FPS: {value:.1}");
    }
}

/// Rewrites the parameter readout only when a parameter changed.
pub fn parameters_text_update_system(
    params: Res<EffectParameters>,
    mut query: Query<&mut Text, With<ParametersText>>,
) {
    if !params.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = params.summary();
    }
}
