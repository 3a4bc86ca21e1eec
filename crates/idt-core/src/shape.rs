//! Shape kinds and vertex synthesis
//!
//! Each kind fixes how many clicks it needs and how its full vertex set is
//! derived from the confirmed points plus the live pointer point:
//! - Line, Triangle, Quad: one vertex per click, unclicked vertices track the pointer
//! - Rectangle, Plane: two opposite corners, the other two inferred from the view axis
//! - Cube: a rectangle base followed by a height click

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::axis::DepthAxis;
use crate::projection::ConstraintPlane;

/// Cube faces as quads over the 8 cube vertices: bottom, four sides, top.
///
/// Vertices 0-3 are the base rectangle, 4-7 the top vertices above them.
pub const CUBE_FACES: [[u32; 4]; 6] = [
    [0, 3, 2, 1],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
    [4, 5, 6, 7],
];

/// Single face of a plane
const PLANE_FACES: [[u32; 4]; 1] = [[0, 1, 2, 3]];

/// How a shape's vertices are connected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Poly curve through the vertices in order
    Polyline {
        /// Whether the last vertex connects back to the first
        cyclic: bool,
    },
    /// Quad faces indexing into the vertices
    Mesh {
        /// Fixed face windings
        faces: Vec<[u32; 4]>,
    },
}

/// Shape that can be constructed interactively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Line,
    Triangle,
    Rectangle,
    Quad,
    Plane,
    Cube,
}

impl ShapeKind {
    /// Get all shape kinds
    pub fn all() -> [ShapeKind; 6] {
        [
            ShapeKind::Line,
            ShapeKind::Triangle,
            ShapeKind::Rectangle,
            ShapeKind::Quad,
            ShapeKind::Plane,
            ShapeKind::Cube,
        ]
    }

    /// Get the display name of the shape, also used for created objects
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Quad => "Quad",
            ShapeKind::Plane => "Plane",
            ShapeKind::Cube => "Cube",
        }
    }

    /// Number of confirming clicks that complete the shape
    pub fn required_clicks(&self) -> usize {
        match self {
            ShapeKind::Line | ShapeKind::Rectangle | ShapeKind::Plane => 2,
            ShapeKind::Triangle | ShapeKind::Cube => 3,
            ShapeKind::Quad => 4,
        }
    }

    /// Number of vertices in the finished shape
    pub fn vertex_count(&self) -> usize {
        match self {
            ShapeKind::Line => 2,
            ShapeKind::Triangle => 3,
            ShapeKind::Rectangle | ShapeKind::Quad | ShapeKind::Plane => 4,
            ShapeKind::Cube => 8,
        }
    }

    /// Connectivity of the shape's vertices
    pub fn topology(&self) -> Topology {
        match self {
            // A closed two-point curve would retrace its only segment
            ShapeKind::Line => Topology::Polyline { cyclic: false },
            ShapeKind::Triangle | ShapeKind::Rectangle | ShapeKind::Quad => {
                Topology::Polyline { cyclic: true }
            }
            ShapeKind::Plane => Topology::Mesh {
                faces: PLANE_FACES.to_vec(),
            },
            ShapeKind::Cube => Topology::Mesh {
                faces: CUBE_FACES.to_vec(),
            },
        }
    }

    /// Check if the preview is shown before the first click lands
    ///
    /// Curve shapes draw a collapsed preview under the pointer right away;
    /// mesh shapes only appear once their first corner is fixed.
    pub fn previews_before_first_click(&self) -> bool {
        matches!(
            self,
            ShapeKind::Line | ShapeKind::Triangle | ShapeKind::Rectangle | ShapeKind::Quad
        )
    }

    /// Working plane for the next point, given the points confirmed so far
    pub fn plane_for(&self, confirmed: &[Vec3], ground: ConstraintPlane) -> ConstraintPlane {
        match (self, confirmed) {
            (ShapeKind::Cube, [first, _, ..]) => ConstraintPlane::upright_through(*first),
            _ => ground,
        }
    }

    /// Check if the next point may snap to an axis-locked view
    ///
    /// The cube's footprint corners always land on the ground plane, so they
    /// skip the orthographic axis lock.
    pub fn snaps_to_view_axis(&self, confirmed: usize) -> bool {
        !(matches!(self, ShapeKind::Cube) && confirmed < 2)
    }

    /// Derive the full vertex set
    ///
    /// # Arguments
    /// * `confirmed` - Points locked in by clicks, in click order
    /// * `live` - Current unconfirmed pointer point
    /// * `axis` - Depth axis of the view, for shapes with inferred corners.
    ///   The cube ignores it: its base is always a ground footprint.
    ///
    /// # Returns
    /// Exactly [`ShapeKind::vertex_count`] vertices. Any point not yet clicked
    /// takes the live point's position.
    pub fn synthesize(&self, confirmed: &[Vec3], live: Vec3, axis: DepthAxis) -> Vec<Vec3> {
        let point = |i: usize| confirmed.get(i).copied().unwrap_or(live);

        match self {
            ShapeKind::Line => vec![point(0), point(1)],
            ShapeKind::Triangle => vec![point(0), point(1), point(2)],
            ShapeKind::Quad => vec![point(0), point(1), point(2), point(3)],
            ShapeKind::Rectangle | ShapeKind::Plane => {
                rectangle_corners(point(0), point(1), axis).to_vec()
            }
            ShapeKind::Cube => {
                let base = rectangle_corners(point(0), point(1), DepthAxis::Z);
                let height = point(2).z;

                let mut vertices = Vec::with_capacity(8);
                vertices.extend_from_slice(&base);
                vertices.extend(base.iter().map(|v| Vec3::new(v.x, v.y, height)));
                vertices
            }
        }
    }
}

/// Four corners of a rectangle from two opposite corners
///
/// `fp` and `lp` become corners 0 and 2. Corners 1 and 3 mix their
/// coordinates in the two axes spanning the view plane.
pub fn rectangle_corners(fp: Vec3, lp: Vec3, axis: DepthAxis) -> [Vec3; 4] {
    let (second, fourth) = match axis {
        DepthAxis::Y => (
            Vec3::new(lp.x, lp.y, fp.z),
            Vec3::new(fp.x, lp.y, lp.z),
        ),
        DepthAxis::X => (
            Vec3::new(lp.x, lp.y, fp.z),
            Vec3::new(lp.x, fp.y, lp.z),
        ),
        DepthAxis::Z => (
            Vec3::new(lp.x, fp.y, lp.z),
            Vec3::new(fp.x, lp.y, lp.z),
        ),
    };

    [fp, second, lp, fourth]
}
