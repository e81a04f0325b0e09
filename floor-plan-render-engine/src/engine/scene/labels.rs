use bevy::prelude::*;
use constants::render_settings::{LABEL_COLOUR, LABEL_FONT_SIZE};
use floor_plan_layout::FigureId;

use super::colour::packed_colour;

/// Screen-space text that follows a world-space anchor.
#[derive(Component, Debug, Clone, Copy)]
pub struct FigureLabel {
    pub figure: FigureId,
    pub anchor: Vec3,
}

pub fn spawn_figure_label(
    commands: &mut Commands,
    figure: FigureId,
    text: &str,
    anchor: Vec3,
) -> Entity {
    commands
        .spawn((
            FigureLabel { figure, anchor },
            Text::new(text),
            TextFont {
                font_size: LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(packed_colour(LABEL_COLOUR)),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            Name::new(format!("Label {}", figure)),
        ))
        .id()
}

/// Project label anchors every frame; anchors behind the camera are hidden.
pub fn update_label_positions(
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut labels: Query<(&FigureLabel, &mut Node, &mut Visibility, &ComputedNode)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    for (label, mut node, mut visibility, computed) in &mut labels {
        match camera.world_to_viewport(camera_transform, label.anchor) {
            Ok(screen) => {
                // Centre the text on the anchor.
                let size = computed.size() * computed.inverse_scale_factor();
                node.left = Val::Px(screen.x - size.x / 2.0);
                node.top = Val::Px(screen.y - size.y / 2.0);
                visibility.set_if_neq(Visibility::Inherited);
            }
            Err(_) => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}
