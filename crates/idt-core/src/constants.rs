//! Global constants for idt-core

/// Default lower bound on a ray direction's length before it is rejected
pub const MIN_RAY_LENGTH: f32 = 1e-12;

/// Default camera field of view in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 40.0;

/// Default distance from the orbit camera to its target
pub const DEFAULT_CAMERA_DISTANCE: f32 = 5.0;

/// Default viewport size in pixels (width, height)
pub const DEFAULT_VIEWPORT_SIZE: [f32; 2] = [1280.0, 720.0];
