use std::collections::HashSet;

use bevy::asset::AssetId;
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::math::Affine3A;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;
use floor_plan_layout::hit::MAX_HIERARCHY_DEPTH;
use floor_plan_layout::placement::PointBounds;

/// Axis-aligned box around every mesh primitive of a loaded glTF, with node
/// transforms applied. `None` when nothing has geometry yet.
pub fn gltf_native_bounds(
    gltf: &Gltf,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
) -> Option<PointBounds> {
    let child_ids: HashSet<AssetId<GltfNode>> = gltf
        .nodes
        .iter()
        .filter_map(|handle| nodes.get(handle))
        .flat_map(|node| node.children.iter().map(|child| child.id()))
        .collect();

    let mut corners = Vec::new();
    for root in gltf.nodes.iter().filter(|h| !child_ids.contains(&h.id())) {
        collect_node_corners(
            root,
            Affine3A::IDENTITY,
            nodes,
            gltf_meshes,
            meshes,
            0,
            &mut corners,
        );
    }

    // Files without a node hierarchy still carry their meshes.
    if corners.is_empty() {
        for gltf_mesh in gltf.meshes.iter().filter_map(|h| gltf_meshes.get(h)) {
            push_mesh_corners(gltf_mesh, Affine3A::IDENTITY, meshes, &mut corners);
        }
    }

    PointBounds::of_points(corners)
}

fn collect_node_corners(
    handle: &Handle<GltfNode>,
    parent: Affine3A,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
    depth: usize,
    corners: &mut Vec<Vec3>,
) {
    if depth >= MAX_HIERARCHY_DEPTH {
        return;
    }
    let Some(node) = nodes.get(handle) else {
        return;
    };

    let world = parent * node.transform.compute_affine();
    if let Some(gltf_mesh) = node.mesh.as_ref().and_then(|h| gltf_meshes.get(h)) {
        push_mesh_corners(gltf_mesh, world, meshes, corners);
    }
    for child in &node.children {
        collect_node_corners(child, world, nodes, gltf_meshes, meshes, depth + 1, corners);
    }
}

fn push_mesh_corners(
    gltf_mesh: &GltfMesh,
    world: Affine3A,
    meshes: &Assets<Mesh>,
    corners: &mut Vec<Vec3>,
) {
    for primitive in &gltf_mesh.primitives {
        let Some(aabb) = meshes.get(&primitive.mesh).and_then(Mesh::compute_aabb) else {
            continue;
        };
        let min = Vec3::from(aabb.min());
        let max = Vec3::from(aabb.max());
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
            corners.push(world.transform_point3(corner));
        }
    }
}
