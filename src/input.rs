use crate::state::State;
use life_view::{Command, Config};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{Key, NamedKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
}

/// Grid cell under a window position, or `None` over the header or past the grid.
pub fn cursor_to_cell(position: PhysicalPosition<f64>, config: &Config) -> Option<(usize, usize)> {
    let grid_y = position.y - config.header_height as f64;
    if position.x < 0.0 || grid_y < 0.0 {
        return None;
    }
    let x = (position.x / config.cell_size as f64).floor() as usize;
    let y = (grid_y / config.cell_size as f64).floor() as usize;
    (x < config.grid_width() && y < config.grid_height()).then_some((x, y))
}

/// Map a pressed key to an action. `hover` is the cell under the pointer.
pub fn key_action(key: Key<&str>, hover: Option<(usize, usize)>) -> Option<KeyAction> {
    match key {
        Key::Named(NamedKey::Escape) => Some(KeyAction::Quit),
        Key::Named(NamedKey::Space) => Some(KeyAction::Command(Command::TogglePause)),
        Key::Named(NamedKey::ArrowRight) => Some(KeyAction::Command(Command::Step)),
        Key::Character(c) if c.eq_ignore_ascii_case("n") => Some(KeyAction::Command(Command::Step)),
        Key::Character(c) if c.eq_ignore_ascii_case("r") => {
            hover.map(|(x, y)| KeyAction::Command(Command::SeedRandom { x, y }))
        }
        _ => None,
    }
}

pub fn handle_mouse_input(state: &mut State, button: MouseButton, element_state: ElementState) {
    if element_state != ElementState::Pressed {
        return;
    }
    let Some((x, y)) = state.hover else {
        return;
    };
    match button {
        MouseButton::Left => state.sim.apply(Command::ToggleCell { x, y }),
        MouseButton::Right => state.sim.apply(Command::SeedRandom { x, y }),
        _ => {}
    }
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.hover = cursor_to_cell(position, &state.config);
}

pub fn handle_cursor_left(state: &mut State) {
    state.hover = None;
}

/// Returns `true` when the key asks to quit.
pub fn handle_key(state: &mut State, event: &KeyEvent) -> bool {
    if event.state != ElementState::Pressed || event.repeat {
        return false;
    }
    match key_action(event.logical_key.as_ref(), state.hover) {
        Some(KeyAction::Quit) => true,
        Some(KeyAction::Command(command)) => {
            state.sim.apply(command);
            false
        }
        None => false,
    }
}
