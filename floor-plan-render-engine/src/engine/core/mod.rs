//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, runtime settings
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset loaders, scene systems, the figure
/// manager and the host bridge.
pub mod app_setup;

/// Application state machine: waiting for floor data, then running.
pub mod app_state;

/// Runtime viewer settings with defaults from the constants crate.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
