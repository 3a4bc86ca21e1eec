//! Construction state machine
//!
//! One [`ShapeState`] lives for a single shape construction. It is created
//! when the tool is invoked, fed pointer and click events, and ends either
//! finished (geometry kept) or cancelled (geometry destroyed).
//!
//! ```text
//! invoke ──> Active(0) ──confirm──> Active(1) ── ... ──> Terminal
//!               │  ^                   │  ^
//!               └──┘ pointer move      └──┘ pointer move
//!   cancel from any Active(k) ──> Cancelled
//! ```

use glam::Vec3;
use thiserror::Error;

use crate::axis::DepthAxis;
use crate::config::{DegeneratePolicy, ToolConfig};
use crate::event::{EventResponse, InputEvent};
use crate::projection::{
    ConstraintPlane, ProjectionError, ProjectionMode, Ray, project, project_onto_plane,
};
use crate::shape::ShapeKind;
use crate::sink::{AllocationRequest, GeometrySink, ObjectId, SinkError, SinkHandle};
use crate::viewport::ViewportProvider;

/// Error raised when a tool is invoked in the wrong place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("Active space must be a 3D viewport")]
    NotA3dViewport,
}

/// Error type for construction operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Geometry sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Pointer event rejected: {0}")]
    Rejected(ProjectionError),

    #[error("Construction has already ended ({0:?})")]
    Ended(Phase),

    #[error("Construction is not finished ({0:?})")]
    NotFinished(Phase),
}

/// Result type for construction operations
pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// Host context a tool is invoked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvokeContext {
    /// Object in edit mode; new geometry is added to it instead of a new object
    pub edit_target: Option<ObjectId>,
}

impl InvokeContext {
    /// Context for adding geometry to an object being edited
    pub fn editing(object: ObjectId) -> Self {
        Self {
            edit_target: Some(object),
        }
    }
}

/// Lifecycle phase of a construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collecting clicks
    Active {
        /// Number of points confirmed so far
        confirmed: usize,
    },
    /// All clicks in; geometry handed to the caller
    Terminal,
    /// Cancelled; geometry destroyed
    Cancelled,
}

/// In-progress construction of one shape
#[derive(Debug, Clone)]
pub struct ShapeState {
    kind: ShapeKind,
    config: ToolConfig,
    phase: Phase,
    /// Points locked in by clicks
    confirmed: Vec<Vec3>,
    /// Latest projection of the pointer, not yet confirmed
    live: Option<Vec3>,
    /// View direction of the latest successful projection
    view_direction: Vec3,
    has_intersection: bool,
    edit_target: Option<ObjectId>,
    handle: Option<SinkHandle>,
    /// Last vertex set pushed to the sink
    vertices: Vec<Vec3>,
}

impl ShapeState {
    /// Start constructing a shape
    ///
    /// Fails without allocating anything unless the viewport is a 3D view.
    /// Curve shapes allocate their geometry right away so the preview can
    /// follow the pointer; mesh shapes wait for their first click.
    pub fn invoke(
        kind: ShapeKind,
        context: InvokeContext,
        viewport: &impl ViewportProvider,
        sink: &mut impl GeometrySink,
        config: ToolConfig,
    ) -> ConstructionResult<Self> {
        if !viewport.is_3d_viewport() {
            tracing::warn!("Cannot draw {}: {}", kind.name(), ContextError::NotA3dViewport);
            return Err(ContextError::NotA3dViewport.into());
        }

        let mut state = Self {
            kind,
            config,
            phase: Phase::Active { confirmed: 0 },
            confirmed: Vec::with_capacity(kind.required_clicks()),
            live: None,
            view_direction: Vec3::NEG_Z,
            has_intersection: false,
            edit_target: context.edit_target,
            handle: None,
            vertices: Vec::new(),
        };

        if kind.previews_before_first_click() {
            state.allocate(sink)?;
        }

        tracing::info!("Started drawing {}", kind.name());
        Ok(state)
    }

    // ============== Accessors ==============

    /// Kind of shape being built
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if the construction is still collecting clicks
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    /// Points confirmed so far, in click order
    pub fn confirmed_points(&self) -> &[Vec3] {
        &self.confirmed
    }

    /// Latest unconfirmed pointer point
    pub fn live_point(&self) -> Option<Vec3> {
        self.live
    }

    /// Check if the latest pointer ray met the working plane
    ///
    /// `false` means the preview shows the last valid position, not the pointer.
    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    /// Geometry handle, once allocated
    pub fn sink_handle(&self) -> Option<SinkHandle> {
        self.handle
    }

    /// Last vertex set pushed to the sink, `None` before the first preview
    /// and after cancellation
    pub fn vertices(&self) -> Option<&[Vec3]> {
        if self.vertices.is_empty() {
            None
        } else {
            Some(&self.vertices)
        }
    }

    /// Working plane for the next point
    pub fn current_plane(&self) -> ConstraintPlane {
        self.kind.plane_for(&self.confirmed, self.config.ground())
    }

    /// Depth axis used for inferred corners
    pub fn depth_axis(&self) -> DepthAxis {
        DepthAxis::from_view_direction(self.view_direction)
    }

    /// Take ownership of the finished geometry
    pub fn finish(self) -> ConstructionResult<SinkHandle> {
        match (self.phase, self.handle) {
            (Phase::Terminal, Some(handle)) => Ok(handle),
            (phase, _) => Err(ConstructionError::NotFinished(phase)),
        }
    }

    // ============== Events ==============

    /// Handle one input event
    ///
    /// Navigation is never consumed, in any phase. Other events after the
    /// construction has ended are rejected.
    pub fn handle(
        &mut self,
        event: InputEvent,
        viewport: &impl ViewportProvider,
        sink: &mut impl GeometrySink,
    ) -> ConstructionResult<EventResponse> {
        if let InputEvent::Navigation(_) = event {
            return Ok(EventResponse::PassThrough);
        }

        if !self.is_active() {
            tracing::warn!("Ignoring {:?}: construction ended", event);
            return Err(ConstructionError::Ended(self.phase));
        }

        match event {
            InputEvent::PointerMove { position } => {
                let ray = viewport.ray_at(position);
                self.pointer_move(ray, viewport.projection_mode(), sink)
            }
            InputEvent::Confirm => self.confirm(sink),
            InputEvent::Cancel => self.cancel(sink),
            InputEvent::Navigation(_) => Ok(EventResponse::PassThrough),
        }
    }

    /// Update the live point from a pointer ray and refresh the preview
    ///
    /// A ray parallel to the working plane leaves the preview alone; see
    /// [`DegeneratePolicy`] for what happens to the live point.
    pub fn pointer_move(
        &mut self,
        ray: Ray,
        mode: ProjectionMode,
        sink: &mut impl GeometrySink,
    ) -> ConstructionResult<EventResponse> {
        if !self.is_active() {
            return Err(ConstructionError::Ended(self.phase));
        }

        if ray.direction.length() < self.config.min_ray_length {
            tracing::warn!("Rejected pointer ray with zero-length direction");
            return Err(ConstructionError::Rejected(ProjectionError::InvalidRay));
        }

        let plane = self.current_plane();
        let projected = if self.kind.snaps_to_view_axis(self.confirmed.len()) {
            project(ray, plane, mode)
        } else {
            project_onto_plane(ray, plane)
        };

        match projected {
            Ok(projection) => {
                self.live = Some(projection.point);
                self.view_direction = projection.view_direction;
                self.has_intersection = true;
            }
            Err(ProjectionError::Degenerate { .. }) => {
                self.has_intersection = false;
                if self.config.degenerate == DegeneratePolicy::ClearLive {
                    self.live = None;
                }
                tracing::warn!("Pointer ray parallel to working plane, preview held");
                return Ok(EventResponse::Running);
            }
            Err(e) => {
                tracing::warn!("Rejected pointer ray: {}", e);
                return Err(ConstructionError::Rejected(e));
            }
        }

        self.refresh(sink)?;
        Ok(EventResponse::Running)
    }

    /// Confirm the live point
    ///
    /// Does nothing until the pointer has produced a point.
    pub fn confirm(&mut self, sink: &mut impl GeometrySink) -> ConstructionResult<EventResponse> {
        if !self.is_active() {
            return Err(ConstructionError::Ended(self.phase));
        }

        let Some(live) = self.live else {
            tracing::debug!("Click ignored: no point under the pointer");
            return Ok(EventResponse::Running);
        };

        if self.handle.is_none() {
            self.allocate(sink)?;
        }

        self.confirmed.push(live);
        if let Err(e) = self.refresh(sink) {
            self.confirmed.pop();
            return Err(e);
        }

        let count = self.confirmed.len();
        tracing::debug!(
            "{} point {}/{} at {:?}",
            self.kind.name(),
            count,
            self.kind.required_clicks(),
            live
        );

        if count == self.kind.required_clicks() {
            self.phase = Phase::Terminal;
            tracing::info!("Finished drawing {}", self.kind.name());
            Ok(EventResponse::Finished)
        } else {
            self.phase = Phase::Active { confirmed: count };
            Ok(EventResponse::Running)
        }
    }

    /// Cancel the construction and destroy its geometry
    pub fn cancel(&mut self, sink: &mut impl GeometrySink) -> ConstructionResult<EventResponse> {
        if !self.is_active() {
            return Err(ConstructionError::Ended(self.phase));
        }

        self.phase = Phase::Cancelled;
        self.confirmed.clear();
        self.live = None;
        self.vertices.clear();

        if let Some(handle) = self.handle.take() {
            sink.destroy(handle)?;
        }

        tracing::info!("Cancelled drawing {}", self.kind.name());
        Ok(EventResponse::Cancelled)
    }

    // ============== Internals ==============

    fn allocate(&mut self, sink: &mut impl GeometrySink) -> ConstructionResult<()> {
        let handle = sink.allocate(AllocationRequest {
            name: self.kind.name().to_string(),
            vertex_count: self.kind.vertex_count(),
            topology: self.kind.topology(),
            attach_to: self.edit_target,
        })?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Recompute the full vertex set and overwrite the sink
    fn refresh(&mut self, sink: &mut impl GeometrySink) -> ConstructionResult<()> {
        let Some(live) = self.live else {
            return Ok(());
        };
        if self.confirmed.is_empty() && !self.kind.previews_before_first_click() {
            return Ok(());
        }
        let Some(handle) = self.handle else {
            return Ok(());
        };

        let vertices = self.kind.synthesize(&self.confirmed, live, self.depth_axis());
        for (index, vertex) in vertices.iter().enumerate() {
            sink.set_vertex(handle, index, *vertex)?;
        }
        self.vertices = vertices;
        Ok(())
    }
}
