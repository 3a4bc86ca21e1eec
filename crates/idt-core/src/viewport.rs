//! Viewport camera and ray provider

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{DEFAULT_CAMERA_DISTANCE, DEFAULT_FOV_DEGREES, DEFAULT_VIEWPORT_SIZE};
use crate::event::{Navigation, ViewPreset};
use crate::projection::{ProjectionMode, Ray};

/// Host viewport as seen by a construction
pub trait ViewportProvider {
    /// Check if the pointer is over a 3D viewport
    fn is_3d_viewport(&self) -> bool;

    /// Projection mode of the viewport
    fn projection_mode(&self) -> ProjectionMode;

    /// World-space ray under a pointer position (pixels, origin top-left)
    fn ray_at(&self, pointer: Vec2) -> Ray;
}

/// Orbit camera over a viewport region, Z up
#[derive(Debug, Clone)]
pub struct ViewportCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
    pub mode: ProjectionMode,
    /// Viewport size in pixels
    pub size: Vec2,
    // Orbit state
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Exact view axis while snapped to a preset
    locked_view: Option<ViewPreset>,
    in_3d_view: bool,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::new(Vec2::from(DEFAULT_VIEWPORT_SIZE))
    }
}

impl ViewportCamera {
    /// Create a new camera with default parameters
    pub fn new(size: Vec2) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            fov: DEFAULT_FOV_DEGREES.to_radians(),
            mode: ProjectionMode::Perspective,
            size,
            yaw: 45.0_f32.to_radians(),
            pitch: 30.0_f32.to_radians(),
            distance: DEFAULT_CAMERA_DISTANCE,
            locked_view: None,
            in_3d_view: true,
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Set the projection mode
    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Mark whether the region under the pointer is a 3D view
    pub fn set_in_3d_view(&mut self, in_3d_view: bool) {
        self.in_3d_view = in_3d_view;
    }

    /// Currently locked view preset, if any
    pub fn locked_view(&self) -> Option<ViewPreset> {
        self.locked_view
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.locked_view = None;
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
        self.update_position_from_orbit();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = self.forward();
        let right = forward.cross(self.up()).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * 0.002;
        let offset = right * (-delta_x * scale) + up * (delta_y * scale);
        self.target += offset;
        self.position += offset;
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(0.1, 10000.0);
        self.position = self.target - self.forward() * self.distance;
    }

    /// Snap to an axis-locked view
    pub fn set_view(&mut self, preset: ViewPreset) {
        let (yaw, pitch) = match preset {
            ViewPreset::Top => (-90.0_f32, 89.0_f32),
            ViewPreset::Front => (-90.0, 0.0),
            ViewPreset::Side => (0.0, 0.0),
        };
        self.yaw = yaw.to_radians();
        self.pitch = pitch.to_radians();
        self.locked_view = Some(preset);
        self.position = self.target - self.forward() * self.distance;
    }

    /// Apply a navigation event
    pub fn navigate(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Orbit { yaw, pitch } => self.orbit(yaw, pitch),
            Navigation::Pan { dx, dy } => self.pan(dx, dy),
            Navigation::Zoom { delta } => self.zoom(delta),
            Navigation::View(preset) => self.set_view(preset),
        }
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.cos();
        let y = self.distance * self.pitch.cos() * self.yaw.sin();
        let z = self.distance * self.pitch.sin();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        match self.locked_view {
            Some(ViewPreset::Top) => Vec3::NEG_Z,
            Some(ViewPreset::Front) => Vec3::Y,
            Some(ViewPreset::Side) => Vec3::NEG_X,
            None => (self.target - self.position).normalize(),
        }
    }

    /// Camera up vector, swapped when looking straight along Z
    fn up(&self) -> Vec3 {
        if self.locked_view == Some(ViewPreset::Top) {
            Vec3::Y
        } else {
            Vec3::Z
        }
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    /// Convert screen coordinates to world ray
    pub fn screen_to_ray(&self, screen_x: f32, screen_y: f32) -> (Vec3, Vec3) {
        // Convert to normalized device coordinates
        let ndc_x = (2.0 * screen_x / self.size.x) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / self.size.y);

        let aspect = self.size.x / self.size.y;
        let half_height = (self.fov * 0.5).tan();
        let inv_view = self.view_matrix().inverse();

        match self.mode {
            ProjectionMode::Perspective => {
                let dir_view = Vec3::new(ndc_x * half_height * aspect, ndc_y * half_height, -1.0);
                (self.position, inv_view.transform_vector3(dir_view).normalize())
            }
            // Parallel rays: keep the exact view axis for axis-lock detection
            ProjectionMode::Orthographic => {
                let extent = self.distance * half_height;
                let offset = Vec3::new(ndc_x * extent * aspect, ndc_y * extent, 0.0);
                (inv_view.transform_point3(offset), self.forward())
            }
        }
    }
}

impl ViewportProvider for ViewportCamera {
    fn is_3d_viewport(&self) -> bool {
        self.in_3d_view
    }

    fn projection_mode(&self) -> ProjectionMode {
        self.mode
    }

    fn ray_at(&self, pointer: Vec2) -> Ray {
        let (origin, direction) = self.screen_to_ray(pointer.x, pointer.y);
        Ray::new(origin, direction)
    }
}
