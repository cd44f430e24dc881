use cgmath::{Matrix4, Point3, SquareMatrix};
use winit::event::{DeviceEvent, KeyEvent};

use crate::config::AppConfig;

use super::{camera_controller::CameraController, fly_camera::FlyCamera};

pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: FlyCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Camera and controller set up from the application config.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut camera = FlyCamera::looking_at(
            Point3::from(config.camera_position),
            Point3::from(config.camera_target),
            config.width as f32 / config.height.max(1) as f32,
        );
        camera.fovy = cgmath::Deg(config.fov_y_degrees).into();
        camera.znear = config.z_near;
        camera.zfar = config.z_far;
        camera.update_view_proj();

        let controller = CameraController::new(config.camera_speed, config.camera_sensitivity);
        Self::new(camera, controller)
    }

    pub fn process_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> bool {
        self.controller.process_keyed_events(event)
    }

    /// Apply held movement keys for `dt` seconds and refresh the uniform.
    pub fn update(&mut self, dt: f32) {
        self.controller.update_camera(&mut self.camera, dt);
        self.camera.update_view_proj();
    }

    /// Get the view projection matrix from the camera
    pub fn get_view_proj_matrix(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{EuclideanSpace, InnerSpace, Vector3};

    #[test]
    fn test_from_config_uses_start_pose() {
        let config = AppConfig::default()
            .with_camera_position([0.0, 2.0, 6.0])
            .with_camera_target([0.0, 2.0, 0.0]);
        let manager = CameraManager::from_config(&config);
        assert_eq!(manager.camera.position, Point3::new(0.0, 2.0, 6.0));
        assert!((manager.camera.forward() - -Vector3::unit_z()).magnitude() < 1e-5);
        assert_eq!(manager.camera.znear, config.z_near);
        assert_eq!(manager.controller.speed, config.camera_speed);
    }

    #[test]
    fn test_update_refreshes_uniform() {
        let mut manager = CameraManager::from_config(&AppConfig::default());
        manager.controller.process_key(winit::keyboard::KeyCode::KeyW, true);
        let before = manager.camera.position;
        manager.update(0.1);
        assert_ne!(manager.camera.position, before);
        let p = manager.camera.position.to_vec();
        assert_eq!(manager.camera.uniform.view_position, [p.x, p.y, p.z, 1.0]);
    }

    #[test]
    fn test_matrix_conversion_is_column_major() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(convert_matrix4_to_array(m)[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
