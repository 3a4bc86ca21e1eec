//! Interactive Shape Construction Core
//!
//! This crate provides:
//! - Projection of a viewport pointer ray onto a working plane
//! - Shape kinds with their click counts and vertex synthesis rules
//! - A click-driven construction state machine with live preview
//! - Collaborator interfaces for the host viewport and geometry sink
//! - An in-memory geometry sink and an orbit viewport camera

pub mod axis;
pub mod config;
pub mod constants;
pub mod event;
pub mod projection;
pub mod shape;
pub mod sink;
pub mod state;
pub mod viewport;

// Re-exports for convenience
pub use axis::DepthAxis;
pub use config::{ConfigError, DegeneratePolicy, PlaneConfig, ToolConfig};
pub use event::{EventResponse, InputEvent, Navigation, ViewPreset};
pub use projection::{
    ConstraintPlane, Projection, ProjectionError, ProjectionMode, Ray, project,
    project_onto_plane, ray_plane_intersection,
};
pub use shape::{CUBE_FACES, ShapeKind, Topology};
pub use sink::{AllocationRequest, GeometrySink, MeshSink, ObjectId, SinkError, SinkHandle};
pub use state::{
    ConstructionError, ConstructionResult, ContextError, InvokeContext, Phase, ShapeState,
};
pub use viewport::{ViewportCamera, ViewportProvider};
