//! Scene bootstrap, asset loading and navigation for the floor plan viewer.

/// Floor data document registered as a JSON asset.
pub mod assets;

/// Orbit camera for inspecting the floor.
pub mod camera;

/// Application setup, state machine and window configuration.
pub mod core;

/// Floor data and figure asset loading.
pub mod loading;

/// Floor, grid, perforated tiles, lights and figure labels.
pub mod scene;
