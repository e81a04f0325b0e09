use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_LIGHT_BRIGHTNESS, AMBIENT_LIGHT_COLOUR, BACKGROUND_COLOUR, POINT_LIGHT_INTENSITY,
    POINT_LIGHT_POSITIONS, POINT_LIGHT_RANGE,
};

use super::colour::packed_colour;

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(ClearColor(packed_colour(BACKGROUND_COLOUR)));
    commands.insert_resource(AmbientLight {
        color: packed_colour(AMBIENT_LIGHT_COLOUR),
        brightness: AMBIENT_LIGHT_BRIGHTNESS,
        ..default()
    });

    for [x, y, z] in POINT_LIGHT_POSITIONS {
        commands.spawn((
            PointLight {
                intensity: POINT_LIGHT_INTENSITY,
                range: POINT_LIGHT_RANGE,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_xyz(x, y, z),
        ));
    }
}
