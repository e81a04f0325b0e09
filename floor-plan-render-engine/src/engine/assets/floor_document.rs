use bevy::prelude::*;
use floor_plan_layout::host_data::HostDataBlock;
use serde::Deserialize;

/// Host data block as a Bevy asset. Mirrors the JSON the page embeds in
/// `<script id="floor-data">`.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FloorDocument(pub HostDataBlock);
