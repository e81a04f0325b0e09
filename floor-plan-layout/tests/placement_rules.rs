use floor_plan_layout::{
    FigureRecord, FloorSpec, PlacementQuality, Rotation, place_figure,
};
use glam::{Vec2, Vec3};

const FLOOR_W: f32 = 20.0;
const FLOOR_L: f32 = 10.0;

fn floor() -> FloorSpec {
    FloorSpec::new(FLOOR_W, FLOOR_L)
}

fn record(kind: &str, angle: f32) -> FigureRecord {
    FigureRecord {
        id: 1,
        type_label: "Figure".into(),
        kind_name: kind.into(),
        position: Vec2::new(2.0, 3.0),
        width: 2.0,
        height: 1.5,
        depth: 1.0,
        rotation: Rotation::from_degrees(angle),
        colour: None,
        rack_id: 0,
    }
}

fn assert_vec2_near(actual: Vec2, expected: Vec2, what: &str) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "{what}: expected {expected:?}, got {actual:?}"
    );
}

fn assert_vec3_near(actual: Vec3, expected: Vec3, what: &str) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "{what}: expected {expected:?}, got {actual:?}"
    );
}

const NATIVE: Vec3 = Vec3::new(0.5, 3.0, 2.0);

#[test]
fn rack_example_offset() {
    let mut r = record("rack", 0.0);
    r.position = Vec2::new(2.0, 3.0);
    r.width = 2.0;
    r.depth = 1.0;
    let p = place_figure(&r, &floor(), NATIVE).unwrap();
    assert_vec2_near(p.angle_offset, Vec2::new(0.5, -0.5), "rack 0°");
}

#[test]
fn rack_corrections_and_translation() {
    let cases = [
        (0.0, Vec2::new(0.5, -0.5)),
        (90.0, Vec2::ZERO),
        (180.0, Vec2::new(0.5, -0.5)),
        (270.0, Vec2::ZERO),
    ];
    for (angle, offset) in cases {
        let p = place_figure(&record("rack", angle), &floor(), NATIVE).unwrap();
        assert_vec2_near(p.angle_offset, offset, &format!("rack {angle}°"));
        // base (-8, -2), + offset, + (d/2, w/2)
        let expected = Vec3::new(-8.0 + offset.x + 0.5, 0.01, -2.0 + offset.y + 1.0);
        assert_vec3_near(p.translation, expected, &format!("rack {angle}° translation"));
        assert_eq!(p.scale, Vec3::new(2.0, 1.5, 1.0));
        assert!((p.rotation_y - angle.to_radians()).abs() < 1e-6);
        assert_eq!(p.quality, PlacementQuality::Exact);
    }
}

#[test]
fn cooler_corrections_and_ratio_scale() {
    let cases = [
        (0.0, Vec2::ZERO),
        (90.0, Vec2::new(1.0, 1.0)),
        (180.0, Vec2::new(2.0, -1.0)),
        (270.0, Vec2::new(0.0, -1.0)),
    ];
    for (angle, offset) in cases {
        let p = place_figure(&record("cooler", angle), &floor(), NATIVE).unwrap();
        assert_vec2_near(p.angle_offset, offset, &format!("cooler {angle}°"));
        let expected = Vec3::new(-8.0 + offset.x, 0.01, -2.0 + offset.y + 1.0);
        assert_vec3_near(p.translation, expected, &format!("cooler {angle}° translation"));
        assert_vec3_near(p.scale, Vec3::new(4.0, 0.5, 0.5), "cooler scale");
    }
}

#[test]
fn raised_floor_corrections() {
    let cases = [
        (0.0, Vec2::ZERO),
        (90.0, Vec2::new(-FLOOR_W - 2.0 / 1.01, FLOOR_L + 0.75)),
        (180.0, Vec2::new(2.0, -1.06)),
        (270.0, Vec2::new(-0.18, -0.6)),
    ];
    for (angle, offset) in cases {
        let p = place_figure(&record("raised_floor", angle), &floor(), NATIVE).unwrap();
        assert_vec2_near(p.angle_offset, offset, &format!("raised floor {angle}°"));
        let expected = Vec3::new(-8.0 + offset.x + 1.515 * 2.0, 0.01, -2.0 + offset.y - 3.85);
        assert_vec3_near(
            p.translation,
            expected,
            &format!("raised floor {angle}° translation"),
        );
    }
}

#[test]
fn electrical_panel_translation_is_angle_independent() {
    for angle in [0.0, 90.0, 180.0, 270.0] {
        let p = place_figure(&record("electrical_panel", angle), &floor(), NATIVE).unwrap();
        assert_eq!(p.angle_offset, Vec2::ZERO);
        assert_vec3_near(
            p.translation,
            Vec3::new(-7.0, 0.76, -2.0 + 1.0 / 9.0),
            "electrical panel translation",
        );
    }
}

#[test]
fn out_of_enum_angle_is_flagged_not_corrected() {
    for kind in ["rack", "cooler", "raised_floor"] {
        let p = place_figure(&record(kind, 30.0), &floor(), NATIVE).unwrap();
        assert_eq!(p.angle_offset, Vec2::ZERO, "{kind}");
        assert_eq!(p.quality, PlacementQuality::UnsupportedAngle(30.0), "{kind}");
    }
}
