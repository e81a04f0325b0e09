use glam::Vec3;

/// Guard against malformed (cyclic) hierarchies.
pub const MAX_HIERARCHY_DEPTH: usize = 64;

/// Walk from `hit` up through `parent_of` until `is_figure` accepts a node.
///
/// Returns `None` when the chain ends (or exceeds [`MAX_HIERARCHY_DEPTH`])
/// without reaching a figure root.
pub fn resolve_figure_root<N, P, F>(hit: N, mut parent_of: P, mut is_figure: F) -> Option<N>
where
    N: Copy,
    P: FnMut(N) -> Option<N>,
    F: FnMut(N) -> bool,
{
    let mut node = hit;
    for _ in 0..MAX_HIERARCHY_DEPTH {
        if is_figure(node) {
            return Some(node);
        }
        node = parent_of(node)?;
    }
    None
}

/// Nearest non-negative hit distance wins.
pub fn nearest_hit<N>(hits: impl IntoIterator<Item = (N, f32)>) -> Option<(N, f32)> {
    let mut best_hit: Option<(N, f32)> = None;
    for (node, t) in hits {
        if !(t >= 0.0) {
            continue;
        }
        match best_hit {
            Some((_, best_t)) if best_t <= t => {}
            _ => best_hit = Some((node, t)),
        }
    }
    best_hit
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;
    for axis in 0..3 {
        let (o, i) = (ray_origin[axis], inv[axis]);
        if i.is_infinite() {
            // Parallel to this slab: inside or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((min[axis] - o) * i, (max[axis] - o) * i);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Intersection of a ray with the horizontal plane `y = plane_y`.
pub fn ray_plane_intersection(origin: Vec3, dir: Vec3, plane_y: f32) -> Option<Vec3> {
    if dir.y.abs() < 0.001 {
        return None;
    }
    let t = (plane_y - origin.y) / dir.y;
    if t > 0.0 { Some(origin + dir * t) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn walks_up_to_tagged_ancestor() {
        // 1 is the figure root; 2 and 3 are nested primitives.
        let parents: HashMap<u32, u32> = [(2, 1), (3, 2), (1, 0)].into();
        let root = resolve_figure_root(3, |n| parents.get(&n).copied(), |n| n == 1);
        assert_eq!(root, Some(1));
    }

    #[test]
    fn untagged_chain_resolves_to_none() {
        let parents: HashMap<u32, u32> = [(2, 1)].into();
        assert_eq!(
            resolve_figure_root(2, |n| parents.get(&n).copied(), |_| false),
            None
        );
    }

    #[test]
    fn cyclic_chain_terminates() {
        assert_eq!(resolve_figure_root(1u32, |n| Some(n ^ 1), |_| false), None);
    }

    #[test]
    fn nearest_hit_ignores_negative_and_nan() {
        let hits = [("a", 3.0), ("b", -1.0), ("c", f32::NAN), ("d", 2.0)];
        assert_eq!(nearest_hit(hits), Some(("d", 2.0)));
    }

    #[test]
    fn slab_test_hits_unit_box() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert_eq!(t, Some(4.5));
        let miss = ray_aabb_hit_t(
            Vec3::new(2.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert_eq!(miss, None);
    }

    #[test]
    fn plane_hit_below_camera() {
        let p = ray_plane_intersection(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 1.0), 0.0);
        assert_eq!(p, Some(Vec3::new(0.0, 0.0, 5.0)));
        assert_eq!(
            ray_plane_intersection(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, 0.0),
            None
        );
    }
}
