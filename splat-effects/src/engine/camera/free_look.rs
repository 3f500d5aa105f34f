use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorMoved, PrimaryWindow, WindowFocused};
use constants::camera::{MOUSE_SENSITIVITY, MOVE_STEP, PITCH_LIMIT};

/// Pointer state of the free-look controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMode {
    /// Button up; pointer motion is ignored.
    Released,
    /// Button down without cursor lock; deltas come from cursor positions.
    Dragging { last_cursor: Vec2 },
    /// Cursor locked; deltas come from raw mouse motion.
    Locked,
}

/// WASD keys held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> Self {
        Self {
            forward: keyboard.pressed(KeyCode::KeyW),
            back: keyboard.pressed(KeyCode::KeyS),
            left: keyboard.pressed(KeyCode::KeyA),
            right: keyboard.pressed(KeyCode::KeyD),
        }
    }
}

/// Yaw/pitch/position integrated directly from input, without smoothing.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FreeLookCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub position: Vec3,
    pub mode: PointerMode,
}

impl Default for FreeLookCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FreeLookCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            position,
            mode: PointerMode::Released,
        }
    }

    pub fn press(&mut self, cursor: Option<Vec2>) {
        self.mode = PointerMode::Dragging {
            last_cursor: cursor.unwrap_or(Vec2::ZERO),
        };
    }

    /// Cursor lock took effect; switch to raw motion.
    pub fn lock_granted(&mut self) {
        if matches!(self.mode, PointerMode::Dragging { .. }) {
            self.mode = PointerMode::Locked;
        }
    }

    pub fn release(&mut self) {
        self.mode = PointerMode::Released;
    }

    /// Applies a pointer delta in pixels. Pitch stays within ±90°.
    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Raw mouse motion; only used while the cursor is locked.
    pub fn raw_motion(&mut self, delta: Vec2) {
        if self.mode == PointerMode::Locked {
            self.look(delta);
        }
    }

    /// Absolute cursor position; only used while dragging without lock.
    pub fn cursor_moved(&mut self, cursor: Vec2) {
        if let PointerMode::Dragging { last_cursor } = self.mode {
            self.look(cursor - last_cursor);
            self.mode = PointerMode::Dragging {
                last_cursor: cursor,
            };
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Moves one fixed step along/across the view direction per held key.
    pub fn step(&mut self, keys: MoveKeys) {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        if keys.forward {
            self.position += forward * MOVE_STEP;
        }
        if keys.back {
            self.position -= forward * MOVE_STEP;
        }
        if keys.left {
            self.position -= right * MOVE_STEP;
        }
        if keys.right {
            self.position += right * MOVE_STEP;
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }
}

fn set_cursor_lock(window: &mut Window, locked: bool) {
    window.cursor_options.grab_mode = if locked {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    window.cursor_options.visible = !locked;
}

/// Pointer look (drag or locked) and WASD movement for the interactive scene.
pub fn free_look_controller(
    mut free_look: ResMut<FreeLookCamera>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut focus_events: EventReader<WindowFocused>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if free_look.mode != PointerMode::Released
        && window.cursor_options.grab_mode == CursorGrabMode::Locked
    {
        free_look.lock_granted();
    }

    if mouse_button.just_pressed(MouseButton::Left) {
        free_look.press(window.cursor_position());
        set_cursor_lock(&mut window, true);
    }

    let focus_lost = focus_events.read().any(|event| !event.focused);
    if mouse_button.just_released(MouseButton::Left) || focus_lost {
        free_look.release();
        set_cursor_lock(&mut window, false);
    }

    let raw_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if raw_delta != Vec2::ZERO {
        free_look.raw_motion(raw_delta);
    }
    for cursor in cursor_moved.read() {
        free_look.cursor_moved(cursor.position);
    }

    free_look.step(MoveKeys::from_keyboard(&keyboard));

    if let Ok(mut transform) = camera_query.single_mut() {
        *transform = free_look.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_stays_clamped_for_any_motion() {
        let mut camera = FreeLookCamera::default();
        camera.press(Some(Vec2::ZERO));
        camera.lock_granted();

        let deltas = [5000.0, -12000.0, 300.0, 99999.0, -0.5, -77777.0, 1e7];
        for dy in deltas {
            camera.raw_motion(Vec2::new(13.0, dy));
            assert!(camera.pitch.abs() <= PITCH_LIMIT);
        }
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn dragging_uses_cursor_deltas() {
        let mut camera = FreeLookCamera::default();
        camera.press(Some(Vec2::new(100.0, 100.0)));
        camera.cursor_moved(Vec2::new(150.0, 90.0));

        assert!((camera.yaw - (-50.0 * MOUSE_SENSITIVITY)).abs() < 1e-6);
        assert!((camera.pitch - (10.0 * MOUSE_SENSITIVITY)).abs() < 1e-6);
        assert_eq!(
            camera.mode,
            PointerMode::Dragging {
                last_cursor: Vec2::new(150.0, 90.0)
            }
        );

        // Raw motion is ignored until the lock is granted.
        camera.raw_motion(Vec2::new(1000.0, 0.0));
        assert!((camera.yaw - (-50.0 * MOUSE_SENSITIVITY)).abs() < 1e-6);
    }

    #[test]
    fn released_pointer_is_ignored() {
        let mut camera = FreeLookCamera::default();
        camera.cursor_moved(Vec2::new(40.0, 40.0));
        camera.raw_motion(Vec2::new(40.0, 40.0));
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);

        camera.press(None);
        camera.lock_granted();
        assert_eq!(camera.mode, PointerMode::Locked);
        camera.release();
        assert_eq!(camera.mode, PointerMode::Released);
        camera.lock_granted();
        assert_eq!(camera.mode, PointerMode::Released);
    }

    #[test]
    fn wasd_moves_relative_to_view() {
        let mut camera = FreeLookCamera::default();
        camera.step(MoveKeys {
            forward: true,
            ..default()
        });
        assert!((camera.position - Vec3::new(0.0, 0.0, -MOVE_STEP)).length() < 1e-6);

        camera.position = Vec3::ZERO;
        camera.step(MoveKeys {
            right: true,
            ..default()
        });
        assert!((camera.position - Vec3::new(MOVE_STEP, 0.0, 0.0)).length() < 1e-6);

        camera.position = Vec3::ZERO;
        camera.yaw = std::f32::consts::FRAC_PI_2;
        camera.step(MoveKeys {
            forward: true,
            ..default()
        });
        assert!((camera.position - Vec3::new(-MOVE_STEP, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut camera = FreeLookCamera::new(Vec3::ONE);
        camera.step(MoveKeys {
            forward: true,
            back: true,
            left: true,
            right: true,
        });
        assert!((camera.position - Vec3::ONE).length() < 1e-6);
    }
}
