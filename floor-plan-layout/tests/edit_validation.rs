use floor_plan_layout::backend::{self, HttpMethod, OnSuccess, RequestBody, rack_page_path};
use floor_plan_layout::forms::FigureDraft;
use floor_plan_layout::{EditError, FigureRecord, FloorSpec, Rotation};
use glam::Vec2;

fn floor() -> FloorSpec {
    let mut floor = FloorSpec::new(10.0, 10.0);
    floor.name = "Floor1".into();
    floor.site_name = "SiteA".into();
    floor
}

fn rack(rack_id: i64) -> FigureRecord {
    FigureRecord {
        id: 5,
        type_label: "Rack A1".into(),
        kind_name: "rack".into(),
        position: Vec2::new(1.0, 1.0),
        width: 2.0,
        height: 2.0,
        depth: 1.0,
        rotation: Rotation::default(),
        colour: None,
        rack_id,
    }
}

#[test]
fn overrunning_edit_builds_no_request() {
    let mut draft = FigureDraft::from_record(&rack(0));
    draft.x_position = 9.0;
    let validation = draft.validate(&floor());
    assert!(validation.edit_error);

    let result = backend::edit_figure(5, &draft, &floor());
    assert!(matches!(result, Err(EditError::OutOfBounds { .. })));
}

#[test]
fn valid_edit_is_a_json_put_that_reloads() {
    let draft = FigureDraft::from_record(&rack(0));
    let request = backend::edit_figure(5, &draft, &floor()).unwrap();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.path, "/edit_figure/5/");
    assert_eq!(request.on_success, OnSuccess::ReloadPage);
    let Some(RequestBody::Json(body)) = request.body else {
        panic!("expected JSON body");
    };
    assert_eq!(body["x_position"], 1.0);
    assert_eq!(body["color"], "none");
}

#[test]
fn rack_navigation_depends_on_assignment() {
    assert_eq!(
        rack_page_path(&floor(), &rack(0)).as_deref(),
        Some("/mtx/assign_rack/SiteA/Floor1/5")
    );
    assert_eq!(
        rack_page_path(&floor(), &rack(12)).as_deref(),
        Some("/mtx/edit_rack/SiteA/Floor1/12")
    );
    let mut cooler = rack(0);
    cooler.kind_name = "cooler".into();
    assert_eq!(rack_page_path(&floor(), &cooler), None);
}
