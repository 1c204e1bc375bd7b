use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::session::NavEvent;

/// Map a key press to a navigation event. Unbound keys give `None`.
pub fn map_key(key: KeyEvent) -> Option<NavEvent> {
    let key = normalize_key(key);
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(NavEvent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Some(NavEvent::DrillIn),
        KeyCode::Esc | KeyCode::Left | KeyCode::Char('q') | KeyCode::Char('h') => {
            Some(NavEvent::Back)
        }
        KeyCode::Down | KeyCode::Char('j') => Some(NavEvent::CursorDown),
        KeyCode::Up | KeyCode::Char('k') => Some(NavEvent::CursorUp),
        KeyCode::Char('?') => Some(NavEvent::Help),
        KeyCode::Char('Q') => Some(NavEvent::Quit),
        _ => None,
    }
}

/// Some terminals report Shift+q as a lowercase char with SHIFT set.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
