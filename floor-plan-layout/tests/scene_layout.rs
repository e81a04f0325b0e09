use std::collections::HashMap;

use floor_plan_layout::{
    FigureKind, FigureRecord, FloorSpec, LayoutError, OccupiedBounds, PlacedFigure, Rotation,
    SceneLayout, place_figure,
};
use glam::{Vec2, Vec3};
use proptest::prelude::*;

fn record(id: i64, kind: FigureKind, x: f32, y: f32, w: f32, d: f32, angle: f32) -> FigureRecord {
    FigureRecord {
        id,
        type_label: format!("Figure {id}"),
        kind_name: kind.name().into(),
        position: Vec2::new(x, y),
        width: w,
        height: 1.0,
        depth: d,
        rotation: Rotation::from_degrees(angle),
        colour: None,
        rack_id: 0,
    }
}

/// Mimic the engine: load then place, tiles skip the asset step.
fn load(layout: &mut SceneLayout<u32>, record: FigureRecord, node: u32) {
    let kind = record.validate().unwrap();
    let placement = if kind.is_asset() {
        assert!(layout.begin_load(record.id));
        assert!(layout.complete_load(record.id));
        Some(place_figure(&record, layout.floor(), Vec3::ONE).unwrap())
    } else {
        None
    };
    layout
        .insert_placed(PlacedFigure {
            record,
            kind,
            placement,
            node,
        })
        .unwrap();
}

fn sample_layout() -> SceneLayout<u32> {
    let mut layout = SceneLayout::new(FloorSpec::new(30.0, 30.0));
    load(&mut layout, record(1, FigureKind::Rack, 2.0, 3.0, 2.0, 1.0, 0.0), 10);
    load(&mut layout, record(2, FigureKind::Cooler, 10.0, 1.0, 3.0, 2.0, 90.0), 20);
    load(&mut layout, record(3, FigureKind::PerforatedTile, 14.0, 12.0, 1.0, 1.0, 0.0), 30);
    layout
}

#[test]
fn load_time_bounds_match_rescan() {
    let mut layout = sample_layout();
    let loaded = layout.bounds();
    assert_eq!(loaded, OccupiedBounds { max_x: 15.0, max_y: 13.0 });
    assert_eq!(layout.rescan_bounds(), loaded);
}

#[test]
fn deletion_removes_figure_label_and_shrinks_bounds() {
    let mut layout = sample_layout();
    layout.attach_label(3, 31).unwrap();
    layout.select(3).unwrap();

    let removed = layout.remove(3).unwrap();
    assert_eq!(removed.label, Some(31));
    assert_eq!(removed.figure.node, 30);
    assert!(!layout.clickable_nodes().any(|n| n == 30));
    assert_eq!(layout.label(3), None);
    assert!(layout.selected().is_none());
    // Cooler at 90° spans x 10..12, y 1..4; rack spans x 2..4, y 3..4.
    assert_eq!(removed.constraints.min_width, 12.0);
    assert_eq!(removed.constraints.min_length, 4.0);
}

#[test]
fn click_on_any_child_resolves_to_same_figure() {
    let layout = sample_layout();
    // 20 is the cooler root; 21..=23 are nested primitives; 99 is unrelated.
    let parents: HashMap<u32, u32> = [(21, 20), (22, 21), (23, 20), (20, 1)].into();
    for hit in [20, 21, 22, 23] {
        let id = layout.resolve_click(hit, |n| parents.get(&n).copied());
        assert_eq!(id, Some(2), "hit on node {hit}");
    }
    assert_eq!(layout.resolve_click(99, |n| parents.get(&n).copied()), None);
}

#[test]
fn cancelled_load_completion_is_discarded() {
    let mut layout = SceneLayout::<u32>::new(FloorSpec::new(10.0, 10.0));
    assert!(layout.begin_load(7));
    assert!(layout.is_pending(7));
    layout.cancel_load(7);
    assert!(!layout.complete_load(7));
    assert_eq!(layout.figures().len(), 0);
}

#[test]
fn deleting_a_loading_figure_discards_its_completion() {
    let mut layout = sample_layout();
    assert!(layout.begin_load(7));

    assert_eq!(layout.remove(7), Err(LayoutError::UnknownFigure(7)));
    assert!(!layout.is_pending(7));
    assert_eq!(layout.pending_count(), 0);
    assert!(!layout.complete_load(7));
    assert_eq!(layout.figures().len(), 3);
}

fn arb_record() -> impl Strategy<Value = (FigureKind, f32, f32, f32, f32, f32)> {
    (
        prop::sample::select(FigureKind::ALL.to_vec()),
        0.0f32..50.0,
        0.0f32..50.0,
        0.1f32..5.0,
        0.1f32..5.0,
        prop::sample::select(vec![0.0f32, 90.0, 180.0, 270.0, 45.0]),
    )
}

proptest! {
    #[test]
    fn rescan_after_zero_deletions_equals_incremental(records in prop::collection::vec(arb_record(), 0..20)) {
        let mut layout = SceneLayout::new(FloorSpec::new(60.0, 60.0));
        for (i, (kind, x, y, w, d, angle)) in records.into_iter().enumerate() {
            let r = record(i as i64, kind, x, y, w, d, angle);
            load(&mut layout, r, i as u32);
        }
        let incremental = layout.bounds();
        prop_assert_eq!(layout.rescan_bounds(), incremental);
    }

    #[test]
    fn bounds_never_grow_after_removal(records in prop::collection::vec(arb_record(), 1..12), pick in 0usize..12) {
        let mut layout = SceneLayout::new(FloorSpec::new(60.0, 60.0));
        let count = records.len();
        for (i, (kind, x, y, w, d, angle)) in records.into_iter().enumerate() {
            load(&mut layout, record(i as i64, kind, x, y, w, d, angle), i as u32);
        }
        let before = layout.bounds();
        let removed = layout.remove((pick % count) as i64).unwrap();
        prop_assert!(removed.constraints.min_width <= before.max_x);
        prop_assert!(removed.constraints.min_length <= before.max_y);
    }
}
