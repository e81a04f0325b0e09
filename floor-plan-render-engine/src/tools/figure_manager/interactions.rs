use bevy::prelude::*;
use super::state::*;

// Handles interactions for the Figure Manager panel buttons
// Chevron icon toggles collapse state
pub fn collapse_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<CollapseButton>)>,
    mut state: ResMut<FigureManagerUiState>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => { state.collapsed = !state.collapsed; *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24)); }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None    => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

// Delete button asks for confirmation, then removes the selected figure
pub fn delete_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<DeleteButton>)>,
    mut delete_events: EventWriter<DeleteSelectedRequest>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                delete_events.write(DeleteSelectedRequest { confirmed: None });
                *bg = BackgroundColor(Color::srgb(0.20, 0.12, 0.12));
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.34, 0.14, 0.14)),
            Interaction::None    => *bg = BackgroundColor(Color::srgb(0.28, 0.10, 0.10)),
        }
    }
}

// View Rack button opens the rack page (only shown for racks)
pub fn view_rack_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<ViewRackButton>)>,
    mut view_events: EventWriter<ViewRackRequest>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => { view_events.write(ViewRackRequest); *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24)); }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None    => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

pub fn clear_selection_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>, With<ClearSelectionButton>)>,
    mut selection_events: EventWriter<SelectionRequest>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => { selection_events.write(SelectionRequest::Clear); *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24)); }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None    => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}
