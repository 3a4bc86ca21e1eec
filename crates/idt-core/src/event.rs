//! Input events and responses

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-locked camera views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPreset {
    /// Looking down -Z
    Top,
    /// Looking along +Y
    Front,
    /// Looking along -X
    Side,
}

/// Camera navigation, always left to the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    /// Rotate around the target (radians)
    Orbit { yaw: f32, pitch: f32 },
    /// Move the target in screen space (pixels)
    Pan { dx: f32, dy: f32 },
    /// Zoom in (positive) or out (negative)
    Zoom { delta: f32 },
    /// Snap to an axis-locked view
    View(ViewPreset),
}

/// Event delivered to an in-progress construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer moved to a viewport position (pixels, origin top-left)
    PointerMove { position: Vec2 },
    /// Confirming click released
    Confirm,
    /// Construction cancelled by the user
    Cancel,
    /// Navigation input, passed back to the host untouched
    Navigation(Navigation),
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Event consumed, keep routing events here
    Running,
    /// Event not consumed, forward it to the host
    PassThrough,
    /// Shape completed, geometry belongs to the caller
    Finished,
    /// Construction cancelled, geometry destroyed
    Cancelled,
}

impl EventResponse {
    /// Check if the construction has ended
    pub fn is_done(&self) -> bool {
        matches!(self, EventResponse::Finished | EventResponse::Cancelled)
    }
}
