// Key and mouse bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Retreat,
    Advance,
    PageUp,
    PageDown,
    Top,
    Bottom,
    ToggleTheme,
    Reload,
    Help,
    Quit,
}

pub(crate) fn key_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::Retreat,
        KeyCode::Down | KeyCode::Char('j') => Action::Advance,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::Top,
        KeyCode::End | KeyCode::Char('G') => Action::Bottom,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Wheel down moves toward the end of the script, wheel up toward the start.
pub(crate) fn mouse_action(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Action::Advance),
        MouseEventKind::ScrollUp => Some(Action::Retreat),
        _ => None,
    }
}
