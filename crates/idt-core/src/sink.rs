//! Geometry sink
//!
//! The sink receives the vertices computed during construction. The core
//! only allocates, overwrites and destroys; it never inspects host scene
//! state beyond the handle it was given.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shape::Topology;

/// Handle to geometry allocated in a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SinkHandle(pub Uuid);

impl SinkHandle {
    /// Create a new random handle
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SinkHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a host scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Request for new geometry
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRequest {
    /// Name for a newly created object
    pub name: String,
    /// Fixed number of vertices
    pub vertex_count: usize,
    /// Connectivity of the vertices
    pub topology: Topology,
    /// Existing object to add the geometry to, instead of creating one
    pub attach_to: Option<ObjectId>,
}

/// Error type for sink operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SinkError {
    #[error("Unknown geometry handle: {0:?}")]
    UnknownHandle(SinkHandle),

    #[error("Unknown object: {0:?}")]
    UnknownObject(ObjectId),

    #[error("Vertex index {index} out of range for {count} vertices")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Destination for constructed geometry
pub trait GeometrySink {
    /// Allocate geometry with a fixed vertex count and topology
    fn allocate(&mut self, request: AllocationRequest) -> Result<SinkHandle, SinkError>;

    /// Overwrite one vertex
    fn set_vertex(&mut self, handle: SinkHandle, index: usize, point: Vec3)
    -> Result<(), SinkError>;

    /// Destroy geometry and anything created along with it
    fn destroy(&mut self, handle: SinkHandle) -> Result<(), SinkError>;

    /// Read back the vertices, `None` once destroyed
    fn vertices(&self, handle: SinkHandle) -> Option<&[Vec3]>;
}

/// A piece of geometry inside an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkElement {
    /// Handle the element was allocated under
    pub handle: SinkHandle,
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Connectivity
    pub topology: Topology,
}

/// A scene object holding one or more elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkObject {
    /// Object identifier
    pub id: ObjectId,
    /// Display name
    pub name: String,
    /// Elements owned by the object
    pub elements: Vec<SinkElement>,
}

impl SinkObject {
    fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            elements: Vec::new(),
        }
    }
}

/// Which object an element lives in, and whether allocation created it
#[derive(Debug, Clone, Copy)]
struct ElementOwner {
    object: ObjectId,
    created_object: bool,
}

/// In-memory geometry sink
///
/// Objects keep insertion order so snapshots are stable.
#[derive(Debug, Clone, Default)]
pub struct MeshSink {
    objects: Vec<SinkObject>,
    owners: HashMap<SinkHandle, ElementOwner>,
    active_object: Option<ObjectId>,
}

impl MeshSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty host object, e.g. a curve being edited
    pub fn add_object(&mut self, name: impl Into<String>) -> ObjectId {
        let object = SinkObject::new(name);
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Get an object by ID
    pub fn object(&self, id: ObjectId) -> Option<&SinkObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get all objects
    pub fn objects(&self) -> &[SinkObject] {
        &self.objects
    }

    /// Most recently created object
    pub fn active_object(&self) -> Option<ObjectId> {
        self.active_object
    }

    /// Get the element allocated under a handle
    pub fn element(&self, handle: SinkHandle) -> Option<&SinkElement> {
        let owner = self.owners.get(&handle)?;
        self.object(owner.object)?
            .elements
            .iter()
            .find(|e| e.handle == handle)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SinkObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    fn element_mut(&mut self, handle: SinkHandle) -> Result<&mut SinkElement, SinkError> {
        let owner = *self
            .owners
            .get(&handle)
            .ok_or(SinkError::UnknownHandle(handle))?;
        self.object_mut(owner.object)
            .and_then(|o| o.elements.iter_mut().find(|e| e.handle == handle))
            .ok_or(SinkError::UnknownHandle(handle))
    }
}

impl GeometrySink for MeshSink {
    fn allocate(&mut self, request: AllocationRequest) -> Result<SinkHandle, SinkError> {
        let handle = SinkHandle::new();
        let element = SinkElement {
            handle,
            vertices: vec![Vec3::ZERO; request.vertex_count],
            topology: request.topology,
        };

        let owner = match request.attach_to {
            Some(id) => {
                let object = self.object_mut(id).ok_or(SinkError::UnknownObject(id))?;
                object.elements.push(element);
                ElementOwner {
                    object: id,
                    created_object: false,
                }
            }
            None => {
                let mut object = SinkObject::new(request.name);
                object.elements.push(element);
                let id = object.id;
                self.objects.push(object);
                self.active_object = Some(id);
                ElementOwner {
                    object: id,
                    created_object: true,
                }
            }
        };

        self.owners.insert(handle, owner);
        tracing::debug!(
            "Allocated {} vertices in object {:?}",
            request.vertex_count,
            owner.object
        );
        Ok(handle)
    }

    fn set_vertex(
        &mut self,
        handle: SinkHandle,
        index: usize,
        point: Vec3,
    ) -> Result<(), SinkError> {
        let element = self.element_mut(handle)?;
        let count = element.vertices.len();
        let vertex = element
            .vertices
            .get_mut(index)
            .ok_or(SinkError::IndexOutOfRange { index, count })?;
        *vertex = point;
        Ok(())
    }

    fn destroy(&mut self, handle: SinkHandle) -> Result<(), SinkError> {
        let owner = self
            .owners
            .remove(&handle)
            .ok_or(SinkError::UnknownHandle(handle))?;

        if owner.created_object {
            self.objects.retain(|o| o.id != owner.object);
            if self.active_object == Some(owner.object) {
                self.active_object = None;
            }
        } else if let Some(object) = self.object_mut(owner.object) {
            object.elements.retain(|e| e.handle != handle);
        }

        tracing::debug!("Destroyed geometry {:?}", handle);
        Ok(())
    }

    fn vertices(&self, handle: SinkHandle) -> Option<&[Vec3]> {
        self.element(handle).map(|e| e.vertices.as_slice())
    }
}
