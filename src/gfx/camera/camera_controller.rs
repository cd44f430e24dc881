use cgmath::Rad;
use winit::{
    event::{DeviceEvent, ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::fly_camera::FlyCamera;

/// Multiplier applied to movement while Shift is held.
const BOOST: f32 = 3.0;

/// Keyboard and mouse state driving a [`FlyCamera`].
///
/// W/S move along the view direction, A/D strafe, Space and Ctrl rise and
/// sink, Shift speeds everything up. Dragging with the left mouse button
/// turns the camera.
pub struct CameraController {
    /// Units per second
    pub speed: f32,
    /// Radians per pixel of mouse motion
    pub sensitivity: f32,
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    boost: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            speed,
            sensitivity,
            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,
            boost: false,
            is_mouse_pressed: false,
        }
    }

    /// Returns `true` when the event changed the camera and a redraw is due.
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut FlyCamera) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                self.process_mouse_motion(delta.0 as f32, delta.1 as f32, camera);
                true
            }
            _ => false,
        }
    }

    /// Turn the camera by a mouse delta in pixels.
    pub fn process_mouse_motion(&mut self, dx: f32, dy: f32, camera: &mut FlyCamera) {
        camera.add_yaw(Rad(dx * self.sensitivity));
        camera.add_pitch(Rad(-dy * self.sensitivity));
    }

    /// Returns `true` if the key is one the controller handles.
    pub fn process_keyed_events(&mut self, event: &KeyEvent) -> bool {
        match event.physical_key {
            PhysicalKey::Code(code) => self.process_key(code, event.state == ElementState::Pressed),
            PhysicalKey::Unidentified(_) => false,
        }
    }

    pub fn process_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        let flag = match code {
            KeyCode::KeyW | KeyCode::ArrowUp => &mut self.forward,
            KeyCode::KeyS | KeyCode::ArrowDown => &mut self.backward,
            KeyCode::KeyA | KeyCode::ArrowLeft => &mut self.left,
            KeyCode::KeyD | KeyCode::ArrowRight => &mut self.right,
            KeyCode::Space => &mut self.up,
            KeyCode::ControlLeft | KeyCode::ControlRight => &mut self.down,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => &mut self.boost,
            _ => return false,
        };
        *flag = pressed;
        true
    }

    /// Returns true while any movement key is held
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    /// Move the camera for the keys currently held over `dt` seconds.
    pub fn update_camera(&self, camera: &mut FlyCamera, dt: f32) {
        let axis = |positive: bool, negative: bool| positive as i32 as f32 - negative as i32 as f32;
        let step = self.speed * dt * if self.boost { BOOST } else { 1.0 };

        camera.move_by(
            axis(self.forward, self.backward) * step,
            axis(self.right, self.left) * step,
            axis(self.up, self.down) * step,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, EuclideanSpace, InnerSpace, Point3, Vector3};

    fn camera() -> FlyCamera {
        FlyCamera::new(Point3::origin(), Deg(-90.0), Deg(0.0), 1.0)
    }

    #[test]
    fn test_forward_key_moves_along_view() {
        let mut controller = CameraController::new(2.0, 0.01);
        let mut camera = camera();
        assert!(controller.process_key(KeyCode::KeyW, true));
        controller.update_camera(&mut camera, 0.5);
        assert!((camera.position.to_vec() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_release_stops_movement() {
        let mut controller = CameraController::new(1.0, 0.01);
        controller.process_key(KeyCode::KeyD, true);
        assert!(controller.is_moving());
        controller.process_key(KeyCode::KeyD, false);
        assert!(!controller.is_moving());

        let mut camera = camera();
        controller.update_camera(&mut camera, 1.0);
        assert_eq!(camera.position, Point3::origin());
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut controller = CameraController::new(1.0, 0.01);
        controller.process_key(KeyCode::Space, true);
        controller.process_key(KeyCode::ControlLeft, true);
        let mut camera = camera();
        controller.update_camera(&mut camera, 1.0);
        assert!(camera.position.y.abs() < 1e-6);
    }

    #[test]
    fn test_shift_boosts_speed() {
        let mut controller = CameraController::new(1.0, 0.01);
        controller.process_key(KeyCode::Space, true);
        controller.process_key(KeyCode::ShiftLeft, true);
        let mut camera = camera();
        controller.update_camera(&mut camera, 1.0);
        assert!((camera.position.y - BOOST).abs() < 1e-5);
    }

    #[test]
    fn test_unhandled_key_is_ignored() {
        let mut controller = CameraController::new(1.0, 0.01);
        assert!(!controller.process_key(KeyCode::KeyQ, true));
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_mouse_motion_turns_camera() {
        let mut controller = CameraController::new(1.0, 0.01);
        let mut camera = camera();
        let yaw = camera.yaw;
        controller.process_mouse_motion(10.0, 0.0, &mut camera);
        assert!((camera.yaw.0 - (yaw.0 + 0.1)).abs() < 1e-5);
        controller.process_mouse_motion(0.0, 10.0, &mut camera);
        assert!(camera.forward().y < 0.0);
    }
}
