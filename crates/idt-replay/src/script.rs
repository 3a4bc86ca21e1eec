//! Session script format
//!
//! A script describes the viewport a session starts in and the input events
//! the user produced, in order. Scripts are RON files:
//!
//! ```ron
//! (
//!     camera: (projection: orthographic, view: Some(top), distance: 10.0),
//!     events: [
//!         pointer_move(position: (400.0, 300.0)),
//!         confirm,
//!         navigation(zoom(delta: 1.0)),
//!         pointer_move(position: (600.0, 150.0)),
//!         confirm,
//!     ],
//! )
//! ```

use std::path::Path;

use glam::{Vec2, Vec3};
use idt_core::{InputEvent, ProjectionMode, ViewPreset, ViewportCamera};
use serde::{Deserialize, Serialize};

use crate::session::ReplayError;

/// Initial camera state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSetup {
    pub projection: ProjectionMode,
    /// Axis-locked view to start in, overrides yaw and pitch
    pub view: Option<ViewPreset>,
    /// Viewport size in pixels
    pub size: [f32; 2],
    pub target: [f32; 3],
    pub distance: f32,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Perspective,
            view: None,
            size: [800.0, 600.0],
            target: [0.0, 0.0, 0.0],
            distance: 10.0,
            yaw_degrees: 45.0,
            pitch_degrees: 30.0,
        }
    }
}

impl CameraSetup {
    /// Build the viewport camera
    pub fn build(&self) -> ViewportCamera {
        let mut camera = ViewportCamera::new(Vec2::from(self.size)).with_mode(self.projection);
        camera.target = Vec3::from(self.target);
        camera.distance = self.distance;
        camera.yaw = self.yaw_degrees.to_radians();
        camera.pitch = 0.0;
        // Orbit recomputes the position and applies the pitch clamp
        camera.orbit(0.0, self.pitch_degrees.to_radians());

        if let Some(view) = self.view {
            camera.set_view(view);
        }
        camera
    }
}

/// A recorded drawing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub camera: CameraSetup,
    /// Whether the pointer is over a 3D viewport
    #[serde(default = "default_in_3d_view")]
    pub in_3d_view: bool,
    /// Name of an object in edit mode to draw into
    #[serde(default)]
    pub edit_object: Option<String>,
    pub events: Vec<InputEvent>,
}

fn default_in_3d_view() -> bool {
    true
}

impl SessionScript {
    /// Parse a script from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self, ReplayError> {
        ron::from_str(content).map_err(|e| ReplayError::Script(e.to_string()))
    }

    /// Load a script from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ReplayError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }
}
