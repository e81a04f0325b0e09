use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the host data block.
    #[default]
    Loading,
    /// Floor is built; figures stream in as their assets load.
    Running,
}

pub fn log_state_transitions(mut transitions: EventReader<StateTransitionEvent<AppState>>) {
    for transition in transitions.read() {
        info!(
            "→ App state {:?} -> {:?}",
            transition.exited, transition.entered
        );
    }
}
