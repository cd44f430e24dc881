//! Application configuration
//!
//! Plain settings with sensible defaults and builder-style setters. There is
//! no file format; demos construct the config in code.

use crate::gfx::resources::LightConfig;

/// Window, camera and lighting settings for a [`GalleryApp`](crate::app::GalleryApp)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Linear RGBA
    pub clear_color: [f64; 4],
    /// Wait for vertical blank (Fifo) instead of presenting immediately
    pub vsync: bool,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    /// Units per second
    pub camera_speed: f32,
    /// Radians per pixel of mouse drag
    pub camera_sensitivity: f32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub light: LightConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
            width: 1280,
            height: 720,
            clear_color: [0.05, 0.05, 0.08, 1.0],
            vsync: true,
            camera_position: [0.0, 1.6, 6.0],
            camera_target: [0.0, 1.0, 0.0],
            camera_speed: 2.5,
            camera_sensitivity: 0.003,
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
            light: LightConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_clear_color(mut self, clear_color: [f64; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_camera_position(mut self, position: [f32; 3]) -> Self {
        self.camera_position = position;
        self
    }

    pub fn with_camera_target(mut self, target: [f32; 3]) -> Self {
        self.camera_target = target;
        self
    }

    pub fn with_camera_speed(mut self, speed: f32) -> Self {
        self.camera_speed = speed;
        self
    }

    pub fn with_camera_sensitivity(mut self, sensitivity: f32) -> Self {
        self.camera_sensitivity = sensitivity;
        self
    }

    pub fn with_fov(mut self, fov_y_degrees: f32) -> Self {
        self.fov_y_degrees = fov_y_degrees.clamp(1.0, 179.0);
        self
    }

    pub fn with_clip_planes(mut self, z_near: f32, z_far: f32) -> Self {
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    pub fn with_light(mut self, light: LightConfig) -> Self {
        self.light = light;
        self
    }

    pub(crate) fn wgpu_clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color { r, g, b, a }
    }

    pub(crate) fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_setters() {
        let config = AppConfig::default()
            .with_title("Shapes")
            .with_size(800, 0)
            .with_vsync(false)
            .with_fov(500.0)
            .with_clip_planes(0.5, 50.0);
        assert_eq!(config.title, "Shapes");
        assert_eq!((config.width, config.height), (800, 1));
        assert_eq!(config.present_mode(), wgpu::PresentMode::AutoNoVsync);
        assert_eq!(config.fov_y_degrees, 179.0);
        assert_eq!((config.z_near, config.z_far), (0.5, 50.0));
    }

    #[test]
    fn test_clear_color_conversion() {
        let config = AppConfig::default().with_clear_color([0.1, 0.2, 0.3, 1.0]);
        let color = config.wgpu_clear_color();
        assert_eq!((color.r, color.g, color.b, color.a), (0.1, 0.2, 0.3, 1.0));
        assert_eq!(AppConfig::default().present_mode(), wgpu::PresentMode::AutoVsync);
    }
}
