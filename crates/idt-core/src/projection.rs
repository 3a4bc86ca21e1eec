//! Pointer projection onto a constraint plane
//!
//! Converts a viewport ray into a 3D point constrained to a working plane.
//! Perspective views intersect the ray with the plane. Orthographic views
//! locked to a world axis drop that axis' coordinate from the ray origin
//! instead, since the ray runs parallel to the axis.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A pointer ray supplied by the host viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Ray start point in world space
    pub origin: Vec3,
    /// Ray direction (magnitude is irrelevant)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

/// Plane onto which pointer positions are projected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintPlane {
    /// Any point on the plane
    pub point: Vec3,
    /// Plane normal (need not be unit length)
    pub normal: Vec3,
}

impl Default for ConstraintPlane {
    fn default() -> Self {
        Self::ground()
    }
}

impl ConstraintPlane {
    /// Create a new constraint plane
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// The ground plane: through the origin, facing +Z
    pub fn ground() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }

    /// Vertical plane through `point`, facing +Y
    pub fn upright_through(point: Vec3) -> Self {
        Self::new(point, Vec3::Y)
    }

    /// Signed distance of `p` from the plane, scaled by the normal's length
    pub fn offset_of(&self, p: Vec3) -> f32 {
        (p - self.point).dot(self.normal)
    }
}

/// Camera projection of the viewport the pointer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// A successful projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// The constrained 3D point
    pub point: Vec3,
    /// View direction used, needed to pick a planar shape's axes
    pub view_direction: Vec3,
}

/// Reasons a pointer ray could not be projected
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjectionError {
    #[error("Ray is parallel to the constraint plane")]
    Degenerate {
        /// View direction of the rejected ray
        view_direction: Vec3,
    },

    #[error("Ray is not finite or has a zero-length direction")]
    InvalidRay,

    #[error("Constraint plane is not finite or has a zero-length normal")]
    InvalidPlane,
}

/// Ray-plane intersection
///
/// Returns `None` only when the ray is exactly parallel to the plane. Points
/// behind the ray origin are valid: the ray stands for an infinite line.
pub fn ray_plane_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let denom = ray_dir.dot(plane_normal);
    if denom == 0.0 {
        return None;
    }

    let d = (plane_point - ray_origin).dot(plane_normal) / denom;
    Some(ray_origin + ray_dir * d)
}

/// Project a pointer ray onto a constraint plane
///
/// # Arguments
/// * `ray` - Pointer ray from the viewport
/// * `plane` - Working plane for the current construction step
/// * `mode` - Projection mode of the viewport
///
/// # Returns
/// The projected point and the view direction, or
/// [`ProjectionError::Degenerate`] when the ray never meets the plane.
pub fn project(
    ray: Ray,
    plane: ConstraintPlane,
    mode: ProjectionMode,
) -> Result<Projection, ProjectionError> {
    validate(ray, plane)?;
    let view_direction = ray.direction;

    if mode == ProjectionMode::Orthographic {
        // Axis-locked views: the ray runs along a world axis, so the plane
        // through the origin reduces to dropping that coordinate.
        let mut origin = ray.origin;
        let locked = if view_direction.y.abs() == 1.0 {
            origin.y = 0.0;
            true
        } else if view_direction.x.abs() == 1.0 {
            origin.x = 0.0;
            true
        } else if view_direction.z.abs() == 1.0 {
            origin.z = 0.0;
            true
        } else {
            false
        };

        if locked {
            return Ok(Projection {
                point: origin,
                view_direction,
            });
        }
    }

    intersect(ray, plane)
}

/// Project a pointer ray onto a constraint plane, ignoring axis locks
///
/// Used where the result must lie on the plane whatever the view.
pub fn project_onto_plane(ray: Ray, plane: ConstraintPlane) -> Result<Projection, ProjectionError> {
    validate(ray, plane)?;
    intersect(ray, plane)
}

fn validate(ray: Ray, plane: ConstraintPlane) -> Result<(), ProjectionError> {
    if !ray.origin.is_finite() || !ray.direction.is_finite() || ray.direction == Vec3::ZERO {
        return Err(ProjectionError::InvalidRay);
    }
    if !plane.point.is_finite() || !plane.normal.is_finite() || plane.normal == Vec3::ZERO {
        return Err(ProjectionError::InvalidPlane);
    }
    Ok(())
}

fn intersect(ray: Ray, plane: ConstraintPlane) -> Result<Projection, ProjectionError> {
    let view_direction = ray.direction;
    ray_plane_intersection(ray.origin, ray.direction, plane.point, plane.normal)
        .map(|point| Projection {
            point,
            view_direction,
        })
        .ok_or(ProjectionError::Degenerate { view_direction })
}
