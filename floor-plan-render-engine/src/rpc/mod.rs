//! Host page integration: JSON-RPC 2.0 messaging, browser dialogs and
//! backend persistence.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Methods
//!
//! ### Queries
//! - `get_floor`: floor spec and current minimum floor size
//! - `get_figures`: every placed figure and the number still loading
//! - `get_selected_figure`: selected figure with its prefilled edit form, or `null`
//! - `get_constraints`: minimum floor width/length from the occupied bounds
//!
//! ### Selection and editing
//! - `select_figure {id}`, `clear_selection`
//! - `delete_selected_figure {confirmed?}`: asks the user unless `confirmed` is given
//! - `validate_edit {draft}`: live X/Y limits and the edit error flag
//! - `save_edit {draft, confirmed?}`: rejected while the draft has errors
//! - `view_rack`: open the rack page for the selected rack
//!
//! ### Forms
//! - `add_figure_defaults {figure_name}`: prefilled sizes and visible inputs
//! - `add_figure {draft}`, `update_floor {draft}`: persisted, then the page reloads
//!
//! ## Notifications
//! `figure_selected`, `selection_cleared`, `floor_constraints_changed`,
//! `figure_deleted`, `pointer_tile`, `edit_validation`, `debug_message`.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (also used for rejected edits)
//! - `-32603`: Internal error (e.g. floor data not loaded yet)

/// Backend request execution: `fetch` on WASM, logged dry run natively.
pub mod backend;

/// Browser dialogs, navigation and the embedded floor data element.
pub mod host;

/// JSON-RPC 2.0 bidirectional communication system for the host page.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
