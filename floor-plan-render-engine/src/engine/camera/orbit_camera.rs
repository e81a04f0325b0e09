use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_MAX_RADIUS, CAMERA_MIN_RADIUS, CAMERA_NEAR,
    CAMERA_START,
};
use floor_plan_layout::hit::ray_plane_intersection;
use floor_plan_layout::pointer::ViewportRect;

use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::figure_manager::state::FigureLayout;

const ORBIT_SENSITIVITY: f32 = 0.005;
const PAN_SENSITIVITY: f32 = 0.0015;
const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = 1.55;

/// Screen space taken by overlays on the right edge (the native side panel).
#[derive(Resource, Default)]
pub struct ViewportInset {
    pub right: f32,
}

/// The part of the window showing the 3D view.
pub fn view_rect(window: &Window, inset: &ViewportInset) -> ViewportRect {
    ViewportRect {
        left: 0.0,
        top: 0.0,
        width: (window.width() - inset.right).max(0.0),
        height: window.height(),
    }
}

#[derive(Resource)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    /// Rotation about +Y, radians.
    pub yaw: f32,
    /// Elevation above the floor plane, radians.
    pub pitch: f32,
    /// Pointer travel since the last button press, logical pixels.
    pub drag_distance: f32,
    dragging: bool,
    last_tile: Option<IVec2>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let start = Vec3::from_array(CAMERA_START);
        let radius = start.length();
        Self {
            focus: Vec3::ZERO,
            radius,
            yaw: start.x.atan2(start.z),
            pitch: (start.y / radius).asin(),
            drag_distance: 0.0,
            dragging: false,
            last_tile: None,
        }
    }
}

impl OrbitCamera {
    /// Pull back far enough to see a floor of the given size.
    pub fn frame_floor(&mut self, width: f32, length: f32) {
        let span = width.max(length);
        self.focus = Vec3::ZERO;
        self.radius = (span * 0.8)
            .max(Vec3::from_array(CAMERA_START).length())
            .clamp(CAMERA_MIN_RADIUS, CAMERA_MAX_RADIUS);
    }

    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.radius;
        Transform::from_translation(self.focus + offset).looking_at(self.focus, Vec3::Y)
    }

    /// A press followed by almost no movement counts as a click.
    pub fn is_click(&self) -> bool {
        self.drag_distance < 4.0
    }
}

pub fn spawn_orbit_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        OrbitCamera::default().transform(),
    ));
}

pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    inset: Res<ViewportInset>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let in_view = window
        .cursor_position()
        .is_some_and(|cursor| view_rect(window, &inset).contains(cursor));

    if mouse_button.any_just_pressed([MouseButton::Left, MouseButton::Right]) {
        orbit.drag_distance = 0.0;
        orbit.dragging = in_view;
    }

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if orbit.dragging && mouse_delta != Vec2::ZERO {
        orbit.drag_distance += mouse_delta.length();

        if mouse_button.pressed(MouseButton::Left) {
            orbit.yaw -= mouse_delta.x * ORBIT_SENSITIVITY;
            orbit.pitch = (orbit.pitch + mouse_delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
        } else if mouse_button.pressed(MouseButton::Right) {
            let right = camera_transform.right().as_vec3();
            let forward = camera_transform.forward().as_vec3();
            let ground_forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
            let speed = orbit.radius * PAN_SENSITIVITY;
            orbit.focus += (-right * mouse_delta.x + ground_forward * mouse_delta.y) * speed;
        }
    }

    // Mouse wheel scroll accumulation (pixel and line scroll)
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if in_view && scroll_accum.abs() > f32::EPSILON {
        let factor = (1.0 - scroll_accum * 0.1).max(0.1);
        orbit.radius = (orbit.radius * factor).clamp(CAMERA_MIN_RADIUS, CAMERA_MAX_RADIUS);
    }

    let target = orbit.transform();
    if *camera_transform != target {
        *camera_transform = target;
    }
}

/// Floor-local coordinates under the pointer, published whenever the
/// pointer crosses into another tile.
pub fn report_pointer_tile(
    mut cursor_moved: EventReader<CursorMoved>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    inset: Res<ViewportInset>,
    layout: Res<FigureLayout>,
    mut orbit: ResMut<OrbitCamera>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(cursor) = cursor_moved.read().last().map(|c| c.position) else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    if !view_rect(window, &inset).contains(cursor) {
        return;
    }
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    let Some(point) = ray_plane_intersection(ray.origin, ray.direction.as_vec3(), 0.0) else {
        return;
    };

    let tile = layout.floor().tile_at(point);
    let cell = tile.floor().as_ivec2();
    if orbit.last_tile == Some(cell) {
        return;
    }
    orbit.last_tile = Some(cell);

    debug!("Pointer over floor tile ({:.2}, {:.2})", tile.x, tile.y);
    rpc_interface.send_notification(
        "pointer_tile",
        serde_json::json!({ "x": tile.x, "y": tile.y }),
    );
}
