/// Background behind the splat scene (linear RGB).
pub const CLEAR_COLOUR: [f32; 3] = [0.0, 0.0, 0.0];

/// Uniform scale applied to every splat object.
pub const SPLAT_OBJECT_SCALE: f32 = 1.5;

/// Overlay text size for the native FPS and parameter readout.
pub const OVERLAY_FONT_SIZE: f32 = 16.0;

/// Seconds between FPS log lines.
pub const FPS_LOG_INTERVAL: f32 = 5.0;
