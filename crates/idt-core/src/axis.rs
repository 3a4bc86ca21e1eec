//! View depth axis selection

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World axis the view looks along
///
/// A two-click planar shape cannot tell from its clicks which two axes span
/// it, so the camera's view direction decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepthAxis {
    X,
    Y,
    #[default]
    Z,
}

impl DepthAxis {
    /// Pick the depth axis for a view direction
    ///
    /// Only an exactly axis-locked Y or X view selects that axis; everything
    /// else, including free perspective views, falls back to Z.
    pub fn from_view_direction(view: Vec3) -> Self {
        if view.y.abs() == 1.0 {
            DepthAxis::Y
        } else if view.x.abs() == 1.0 {
            DepthAxis::X
        } else {
            DepthAxis::Z
        }
    }
}
