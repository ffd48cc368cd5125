use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::orbit_camera::OrbitCamera;

/// Default damping factor; velocity decays by this fraction each frame.
pub const DEFAULT_DAMPING: f32 = 0.05;

/// Pointer-driven orbit control with inertial damping and optional
/// auto-rotation, in the manner of the classic orbit-controls helpers.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Fraction of angular velocity shed per frame, `0.0..1.0`.
    pub damping: f32,
    pub auto_rotate: bool,
    /// Auto-rotation rate in radians per second.
    pub auto_rotate_speed: f32,
    /// When false the controller ignores all input (scenes that hand the
    /// pointer to object dragging instead).
    pub enabled: bool,
    pub zoom_enabled: bool,
    yaw_velocity: f32,
    pitch_velocity: f32,
    pointer_pressed: bool,
    last_cursor: Option<(f64, f64)>,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            damping: DEFAULT_DAMPING,
            auto_rotate: false,
            auto_rotate_speed: std::f32::consts::TAU / 30.0,
            enabled: true,
            zoom_enabled: true,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            pointer_pressed: false,
            last_cursor: None,
        }
    }

    /// A controller that never moves the camera.
    pub fn disabled() -> Self {
        let mut controller = Self::new(0.0, 0.0);
        controller.enabled = false;
        controller.zoom_enabled = false;
        controller
    }

    /// Feeds a window event in. Returns `true` when the camera moved.
    pub fn process_window_event(
        &mut self,
        event: &WindowEvent,
        camera: &mut OrbitCamera,
    ) -> bool {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.set_pointer_pressed(*state == ElementState::Pressed);
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.apply_cursor_move(position.x, position.y)
            }
            WindowEvent::CursorLeft { .. } => {
                self.set_pointer_pressed(false);
                self.last_cursor = None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                self.apply_zoom(scroll_amount, camera)
            }
            _ => false,
        }
    }

    pub fn set_pointer_pressed(&mut self, pressed: bool) {
        self.pointer_pressed = pressed;
    }

    /// Tracks the cursor; while pressed and enabled the movement delta
    /// feeds angular velocity. Returns `true` when velocity changed.
    pub fn apply_cursor_move(&mut self, x: f64, y: f64) -> bool {
        let moved = if let (Some((last_x, last_y)), true, true) =
            (self.last_cursor, self.pointer_pressed, self.enabled)
        {
            let dx = (x - last_x) as f32;
            let dy = (y - last_y) as f32;
            self.yaw_velocity -= dx * self.rotate_speed;
            self.pitch_velocity += dy * self.rotate_speed;
            true
        } else {
            false
        };
        self.last_cursor = Some((x, y));
        moved
    }

    /// Dollies the camera by a scroll amount. Returns `true` when applied.
    pub fn apply_zoom(&mut self, scroll: f32, camera: &mut OrbitCamera) -> bool {
        if !self.enabled || !self.zoom_enabled {
            return false;
        }
        camera.add_distance(scroll * self.zoom_speed);
        true
    }

    /// Applies accumulated velocity and auto-rotation for one frame.
    pub fn update(&mut self, camera: &mut OrbitCamera, dt: f32) {
        if self.auto_rotate && self.enabled {
            camera.add_yaw(self.auto_rotate_speed * dt);
        }

        if self.yaw_velocity.abs() > f32::EPSILON || self.pitch_velocity.abs() > f32::EPSILON {
            camera.add_yaw(self.yaw_velocity);
            camera.add_pitch(self.pitch_velocity);
        }

        let decay = 1.0 - self.damping.clamp(0.0, 1.0);
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(8.0, 0.0, 0.0, Vector3::zero(), 1.0)
    }

    #[test]
    fn drag_accumulates_velocity_that_damps_out() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = camera();

        controller.apply_cursor_move(100.0, 100.0);
        controller.set_pointer_pressed(true);
        assert!(controller.apply_cursor_move(110.0, 100.0));

        let yaw_before = camera.yaw;
        controller.update(&mut camera, 1.0 / 60.0);
        assert!(camera.yaw < yaw_before, "drag right orbits negative yaw");

        for _ in 0..600 {
            controller.update(&mut camera, 1.0 / 60.0);
        }
        let settled = camera.yaw;
        controller.update(&mut camera, 1.0 / 60.0);
        assert!((camera.yaw - settled).abs() < 1e-4, "velocity decays to rest");
    }

    #[test]
    fn unpressed_cursor_moves_only_track_position() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = camera();
        let yaw = camera.yaw;

        assert!(!controller.apply_cursor_move(0.0, 0.0));
        assert!(!controller.apply_cursor_move(50.0, 50.0));
        controller.update(&mut camera, 1.0 / 60.0);

        assert_eq!(camera.yaw, yaw);
    }

    #[test]
    fn disabled_controller_ignores_input() {
        let mut controller = CameraController::disabled();
        let mut camera = camera();
        let yaw = camera.yaw;
        let distance = camera.distance;

        controller.apply_cursor_move(0.0, 0.0);
        controller.set_pointer_pressed(true);
        assert!(!controller.apply_cursor_move(50.0, 50.0));
        assert!(!controller.apply_zoom(1.0, &mut camera));
        controller.update(&mut camera, 1.0 / 60.0);

        assert_eq!(camera.yaw, yaw);
        assert_eq!(camera.distance, distance);
    }

    #[test]
    fn auto_rotate_advances_yaw() {
        let mut controller = CameraController::new(0.005, 0.1);
        controller.auto_rotate = true;
        let mut camera = camera();
        let yaw = camera.yaw;

        controller.update(&mut camera, 0.5);
        assert!(camera.yaw > yaw);
    }

    #[test]
    fn zoom_moves_the_camera_out() {
        let mut controller = CameraController::new(0.005, 0.5);
        let mut camera = camera();

        assert!(controller.apply_zoom(2.0, &mut camera));
        assert_eq!(camera.distance, 9.0);
    }
}
