//! Interactive tools for the floor view.
//!
//! The figure manager is the only tool: pick, select, edit and delete
//! placed figures. It is driven by the mouse and keyboard natively and by
//! JSON-RPC requests from the host page on WASM.
//!
//! ## Cross-Platform Considerations
//!
//! ### Native Builds
//! - Collapsible side panel with the selected figure and its actions
//! - `Delete` removes the selected figure, `Escape` clears the selection
//!
//! ### WASM Builds
//! - Forms live in the host page and talk to the viewer over JSON-RPC 2.0
//! - Dialogs use the browser's `alert` and `confirm`

/// Figure selection, deletion and editing with the native side panel.
pub mod figure_manager;
