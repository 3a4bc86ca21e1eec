//! Replaying a script through one shape construction

use glam::Vec3;
use idt_core::{
    ConfigError, ConstructionError, EventResponse, InputEvent, InvokeContext, MeshSink, ShapeKind,
    ShapeState, ToolConfig, sink::SinkObject,
};
use serde::Serialize;

use crate::script::SessionScript;

/// How a replayed construction ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Finished,
    Cancelled,
    /// Script ran out of events before the shape was complete
    Incomplete,
}

/// Result of a replay, printed as JSON
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub shape: ShapeKind,
    pub outcome: Outcome,
    /// Points confirmed by clicks
    pub confirmed: Vec<Vec3>,
    /// Scene contents after the session
    pub objects: Vec<SinkObject>,
}

/// Replay errors
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid script: {0}")]
    Script(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Drive a fresh construction of `kind` with the script's events
pub fn replay(
    kind: ShapeKind,
    script: &SessionScript,
    config: ToolConfig,
) -> Result<ReplayReport, ReplayError> {
    let mut camera = script.camera.build();
    camera.set_in_3d_view(script.in_3d_view);

    let mut sink = MeshSink::new();
    let context = match &script.edit_object {
        Some(name) => InvokeContext::editing(sink.add_object(name.clone())),
        None => InvokeContext::default(),
    };

    let mut state = ShapeState::invoke(kind, context, &camera, &mut sink, config)?;
    let mut outcome = Outcome::Incomplete;

    for (index, event) in script.events.iter().enumerate() {
        let response = match state.handle(*event, &camera, &mut sink) {
            Ok(response) => response,
            Err(ConstructionError::Rejected(e)) => {
                tracing::warn!("Event {} rejected: {}", index, e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match response {
            EventResponse::PassThrough => {
                if let InputEvent::Navigation(navigation) = event {
                    camera.navigate(*navigation);
                }
            }
            EventResponse::Finished => outcome = Outcome::Finished,
            EventResponse::Cancelled => outcome = Outcome::Cancelled,
            EventResponse::Running => {}
        }

        if response.is_done() {
            break;
        }
    }

    if outcome == Outcome::Incomplete {
        tracing::warn!(
            "Script ended with {}/{} points confirmed",
            state.confirmed_points().len(),
            kind.required_clicks()
        );
    }

    Ok(ReplayReport {
        shape: state.kind(),
        outcome,
        confirmed: state.confirmed_points().to_vec(),
        objects: sink.objects().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use idt_core::{ContextError, Topology};

    fn run(kind: ShapeKind, script: &str) -> ReplayReport {
        let script = SessionScript::from_ron_str(script).unwrap();
        replay(kind, &script, ToolConfig::default()).unwrap()
    }

    #[test]
    fn test_rectangle_in_top_view() {
        let report = run(
            ShapeKind::Rectangle,
            r#"(
                camera: (projection: orthographic, view: Some(top)),
                events: [
                    pointer_move(position: (400.0, 300.0)),
                    confirm,
                    pointer_move(position: (600.0, 150.0)),
                    confirm,
                ],
            )"#,
        );

        assert_eq!(report.outcome, Outcome::Finished);
        assert_eq!(report.objects.len(), 1);

        let v = &report.objects[0].elements[0].vertices;
        assert_eq!(v.len(), 4);
        assert_abs_diff_eq!(v[0].x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(v[0].y, 0.0, epsilon = 1e-4);
        assert!(v[2].x > 0.0 && v[2].y > 0.0);
        assert_eq!(v[1].x, v[2].x);
        assert_eq!(v[1].y, v[0].y);
        assert_eq!(v[3].x, v[0].x);
        assert_eq!(v[3].y, v[2].y);
        assert!(v.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_navigation_reaches_camera() {
        // Switching to the front view mid-session puts the rectangle upright
        let report = run(
            ShapeKind::Rectangle,
            r#"(
                camera: (projection: orthographic),
                events: [
                    navigation(view(front)),
                    pointer_move(position: (400.0, 300.0)),
                    confirm,
                    pointer_move(position: (600.0, 150.0)),
                    confirm,
                ],
            )"#,
        );

        assert_eq!(report.outcome, Outcome::Finished);
        let v = &report.objects[0].elements[0].vertices;
        assert!(v.iter().all(|p| p.y == 0.0));
        assert!(v[2].z > 0.0);
        assert_eq!(v[1].z, v[0].z);
        assert_eq!(v[3].z, v[2].z);
    }

    #[test]
    fn test_cancelled_session_leaves_nothing() {
        let report = run(
            ShapeKind::Quad,
            r#"(
                events: [
                    pointer_move(position: (400.0, 300.0)),
                    confirm,
                    pointer_move(position: (500.0, 300.0)),
                    cancel,
                    confirm,
                ],
            )"#,
        );

        assert_eq!(report.outcome, Outcome::Cancelled);
        assert!(report.objects.is_empty());
        assert!(report.confirmed.is_empty());
    }

    #[test]
    fn test_incomplete_cube() {
        let report = run(
            ShapeKind::Cube,
            r#"(
                events: [
                    pointer_move(position: (400.0, 300.0)),
                    confirm,
                    pointer_move(position: (500.0, 350.0)),
                ],
            )"#,
        );

        assert_eq!(report.outcome, Outcome::Incomplete);
        assert_eq!(report.confirmed.len(), 1);
        let element = &report.objects[0].elements[0];
        assert_eq!(element.vertices.len(), 8);
        assert!(matches!(element.topology, Topology::Mesh { .. }));
    }

    #[test]
    fn test_cube_across_views() {
        // Footprint in the top view, height in the front view
        let report = run(
            ShapeKind::Cube,
            r#"(
                camera: (projection: orthographic, view: Some(top)),
                events: [
                    pointer_move(position: (400.0, 300.0)),
                    confirm,
                    pointer_move(position: (600.0, 150.0)),
                    confirm,
                    navigation(view(front)),
                    pointer_move(position: (500.0, 150.0)),
                    confirm,
                ],
            )"#,
        );

        assert_eq!(report.outcome, Outcome::Finished);
        let v = &report.objects[0].elements[0].vertices;
        assert!(v[..4].iter().all(|p| p.z == 0.0));
        assert!(v[2].x > v[0].x && v[2].y > v[0].y);

        let height = v[4].z;
        assert!(height > 0.0);
        for (top, base) in v[4..].iter().zip(&v[..4]) {
            assert_eq!((top.x, top.y, top.z), (base.x, base.y, height));
        }
    }

    #[test]
    fn test_edit_object_receives_geometry() {
        let report = run(
            ShapeKind::Line,
            r#"(
                edit_object: Some("Curve"),
                events: [
                    pointer_move(position: (400.0, 300.0)),
                    confirm,
                    pointer_move(position: (450.0, 300.0)),
                    confirm,
                ],
            )"#,
        );

        assert_eq!(report.outcome, Outcome::Finished);
        assert_eq!(report.objects.len(), 1);
        assert_eq!(report.objects[0].name, "Curve");
        assert_eq!(report.objects[0].elements.len(), 1);
    }

    #[test]
    fn test_not_a_3d_view() {
        let script = SessionScript::from_ron_str("(in_3d_view: false, events: [])").unwrap();
        let result = replay(ShapeKind::Line, &script, ToolConfig::default());

        assert!(matches!(
            result,
            Err(ReplayError::Construction(ConstructionError::Context(
                ContextError::NotA3dViewport
            )))
        ));
    }

    #[test]
    fn test_report_serializes() {
        let report = run(ShapeKind::Line, "(events: [])");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["shape"], "line");
        assert_eq!(json["outcome"], "incomplete");
    }
}
