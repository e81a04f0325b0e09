use bevy::prelude::*;
use floor_plan_layout::FloorConstraints;

use super::state::*;
use crate::engine::camera::orbit_camera::ViewportInset;

const TEXT_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);
const MUTED_TEXT_COLOUR: Color = Color::srgb(0.70, 0.72, 0.76);

// Spawns the Figure Manager panel with header, selection details and buttons
pub fn spawn_figure_manager_ui(mut commands: Commands, state: Res<FigureManagerUiState>) {
    let body_display = if state.collapsed { Display::None } else { Display::Flex };

    commands
        .spawn((
            FigureManagerRoot,
            Name::new("FigureManagerPanel"),
            BackgroundColor(Color::srgb(0.10, 0.11, 0.13)),
            Node {
                width: Val::Px(state.width()),
                min_width: Val::Px(0.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                justify_content: JustifyContent::FlexStart,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            let (pad, btn) = if state.collapsed { (4.0, 24.0) } else { (12.0, 28.0) };

            parent
                .spawn((
                    HeaderNode,
                    Name::new("Header"),
                    BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(pad)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: if state.collapsed { JustifyContent::FlexEnd } else { JustifyContent::SpaceBetween },
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        TitleText,
                        Name::new("Title"),
                        Text::new("Figure Manager"),
                        TextFont { font_size: 18.0, ..default() },
                        TextColor(TEXT_COLOUR),
                        Node { display: body_display, ..default() },
                    ));

                    let chevron = if state.collapsed { "<" } else { ">" };
                    header
                        .spawn((
                            CollapseButton,
                            Name::new("CollapseButton"),
                            Button,
                            BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            Node {
                                width: Val::Px(btn),
                                height: Val::Px(btn),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|btn_parent| {
                            btn_parent.spawn((
                                CollapseLabel,
                                Text::new(chevron),
                                TextFont { font_size: 18.0, ..default() },
                                TextColor(TEXT_COLOUR),
                            ));
                        });
                });

            parent
                .spawn((
                    FigureManagerBody,
                    Name::new("Body"),
                    BackgroundColor(Color::srgb(0.12, 0.13, 0.15)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        row_gap: Val::Px(8.0),
                        display: body_display,
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    body.spawn((
                        SelectedFigureText,
                        Text::new("No figure selected"),
                        TextFont { font_size: 16.0, ..default() },
                        TextColor(TEXT_COLOUR),
                    ));
                    body.spawn((
                        FigureDetailsText,
                        Text::new(""),
                        TextFont { font_size: 14.0, ..default() },
                        TextColor(MUTED_TEXT_COLOUR),
                    ));
                    body.spawn((
                        ConstraintsText,
                        Text::new(constraints_text(FloorConstraints::default())),
                        TextFont { font_size: 14.0, ..default() },
                        TextColor(MUTED_TEXT_COLOUR),
                    ));

                    spawn_button(body, (DeleteButton, Name::new("DeleteButton")), "Delete Figure", Color::srgb(0.28, 0.10, 0.10), Display::Flex);
                    spawn_button(body, (ViewRackButton, Name::new("ViewRackButton")), "View Rack", Color::srgb(0.22, 0.24, 0.28), Display::None);
                    spawn_button(body, (ClearSelectionButton, Name::new("ClearSelectionButton")), "Clear Selection", Color::srgb(0.22, 0.24, 0.28), Display::Flex);
                });
        });
}

fn spawn_button(body: &mut ChildSpawnerCommands, marker: impl Bundle, label: &str, colour: Color, display: Display) {
    body.spawn((
        marker,
        Button,
        BackgroundColor(colour),
        BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
        Node {
            width: Val::Percent(100.0),
            height: Val::Px(36.0),
            display,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
    ))
    .with_children(|btn| {
        btn.spawn((
            Text::new(label),
            TextFont { font_size: 16.0, ..default() },
            TextColor(TEXT_COLOUR),
        ));
    });
}

fn constraints_text(constraints: FloorConstraints) -> String {
    format!("Minimum floor: {:.2} x {:.2}", constraints.min_width, constraints.min_length)
}

pub fn apply_collapse_state(
    state: Res<FigureManagerUiState>,
    mut inset: ResMut<ViewportInset>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<FigureManagerRoot>>,
        Query<&mut Node, With<FigureManagerBody>>,
        Query<&mut Node, With<HeaderNode>>,
        Query<&mut Node, With<TitleText>>,
        Query<&mut Node, With<CollapseButton>>,
    )>,
    mut chevrons: Query<&mut Text, With<CollapseLabel>>,
) {
    if !state.is_changed() { return; }

    // Picking and the pointer tile ignore the area under the panel.
    inset.right = state.width();

    if let Ok(mut n) = nodes.p0().single_mut() {
        n.width = Val::Px(state.width());
    }
    if let Ok(mut n) = nodes.p1().single_mut() {
        n.display = if state.collapsed { Display::None } else { Display::Flex };
    }
    if let Ok(mut n) = nodes.p2().single_mut() {
        let pad = if state.collapsed { 4.0 } else { 12.0 };
        n.padding = UiRect::all(Val::Px(pad));
        n.justify_content = if state.collapsed { JustifyContent::FlexEnd } else { JustifyContent::SpaceBetween };
    }
    if let Ok(mut n) = nodes.p3().single_mut() {
        n.display = if state.collapsed { Display::None } else { Display::Flex };
    }
    if let Ok(mut n) = nodes.p4().single_mut() {
        let s = if state.collapsed { 24.0 } else { 28.0 };
        n.width = Val::Px(s);
        n.height = Val::Px(s);
    }
    for mut t in &mut chevrons {
        *t = Text::new(if state.collapsed { "<" } else { ">" });
    }
}

// Selected figure name, its record and whether it has a rack page
pub fn reflect_selection(
    layout: Option<Res<FigureLayout>>,
    mut texts: ParamSet<(
        Query<&mut Text, With<SelectedFigureText>>,
        Query<&mut Text, With<FigureDetailsText>>,
    )>,
    mut view_rack: Query<&mut Node, With<ViewRackButton>>,
) {
    let Some(layout) = layout else { return; };
    if !layout.is_changed() { return; }

    let selected = layout.selected();
    let title = match selected {
        Some(figure) => format!("Figure: {}", figure.record.type_label),
        None => "No figure selected".to_string(),
    };
    let details = match selected {
        Some(figure) => {
            let record = &figure.record;
            format!(
                "{}\nPosition: {:.2}, {:.2}\nSize: {:.2} x {:.2} x {:.2}\nAngle: {}",
                figure.kind.display_label(),
                record.position.x,
                record.position.y,
                record.width,
                record.depth,
                record.height,
                record.rotation.degrees(),
            )
        }
        None => String::new(),
    };

    if let Ok(mut t) = texts.p0().single_mut() {
        if t.0 != title { *t = Text::new(title); }
    }
    if let Ok(mut t) = texts.p1().single_mut() {
        if t.0 != details { *t = Text::new(details); }
    }
    if let Ok(mut n) = view_rack.single_mut() {
        let is_rack = selected.is_some_and(|f| f.record.is_rack());
        n.display = if is_rack { Display::Flex } else { Display::None };
    }
}

pub fn reflect_constraints(
    mut events: EventReader<FloorConstraintsChanged>,
    mut q: Query<&mut Text, With<ConstraintsText>>,
) {
    let Some(FloorConstraintsChanged(constraints)) = events.read().last().copied() else { return; };
    if let Ok(mut t) = q.single_mut() {
        *t = Text::new(constraints_text(constraints));
    }
}
