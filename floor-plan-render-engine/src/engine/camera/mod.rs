//! Camera control for the floor view.
//!
//! Left drag orbits around the focus point, right drag pans, the wheel
//! dollies. Drags that start over the native side panel are ignored.

/// Orbit camera resource, controller and floor hover reporting.
pub mod orbit_camera;
