//! Asset types registered with the Bevy asset server.

/// The host data block as a JSON asset, for native builds that load it from disk.
pub mod floor_document;
