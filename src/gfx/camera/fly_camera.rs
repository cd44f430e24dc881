use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Largest pitch magnitude, just short of straight up or down.
const MAX_PITCH: Rad<f32> = Rad(std::f32::consts::FRAC_PI_2 - 0.01);

/// First-person camera that moves freely through the scene.
///
/// Yaw is measured from +X towards +Z, so a yaw of -90 degrees looks down -Z.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Point3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y());
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FlyCamera {
    pub fn new(
        position: Point3<f32>,
        yaw: impl Into<Rad<f32>>,
        pitch: impl Into<Rad<f32>>,
        aspect: f32,
    ) -> Self {
        let mut camera = Self {
            position,
            yaw: yaw.into(),
            pitch: Rad(0.0),
            aspect,
            fovy: Deg(45.0).into(),
            znear: 0.1,
            zfar: 100.0,
            uniform: CameraUniform::default(),
        };
        camera.set_pitch(pitch.into());
        camera.update_view_proj();
        camera
    }

    /// Camera at `position` facing `target`.
    pub fn looking_at(position: Point3<f32>, target: Point3<f32>, aspect: f32) -> Self {
        let direction = target - position;
        let (yaw, pitch) = if direction.magnitude2() > f32::EPSILON {
            let direction = direction.normalize();
            (
                Rad(direction.z.atan2(direction.x)),
                Rad(direction.y.clamp(-1.0, 1.0).asin()),
            )
        } else {
            (Deg(-90.0).into(), Rad(0.0))
        };
        Self::new(position, yaw, pitch, aspect)
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vector3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize()
    }

    /// Unit vector to the camera's right, always horizontal.
    pub fn right(&self) -> Vector3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        Vector3::new(-sin_yaw, 0.0, cos_yaw)
    }

    /// Move along the view direction, the horizontal right vector and world up.
    pub fn move_by(&mut self, forward: f32, right: f32, up: f32) {
        self.position += self.forward() * forward + self.right() * right + Vector3::unit_y() * up;
    }

    pub fn add_yaw(&mut self, delta: Rad<f32>) {
        self.yaw = (self.yaw + delta).normalize_signed();
    }

    pub fn set_pitch(&mut self, pitch: Rad<f32>) {
        self.pitch = Rad(pitch.0.clamp(-MAX_PITCH.0, MAX_PITCH.0));
    }

    pub fn add_pitch(&mut self, delta: Rad<f32>) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = self.position.to_homogeneous().into();
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}
