#![forbid(unsafe_code)]

//! Navigation input vocabulary.
//!
//! The tab engine consumes only [`NavEvent`]s. Terminal key presses are
//! translated here, so swapping the input device never touches navigation
//! logic.
//!
//! # Default bindings
//!
//! | Key | Event |
//! |-----|-------|
//! | `Left` / `Right` | [`NavEvent::TabBackward`] / [`NavEvent::TabForward`] |
//! | `Up` / `Down` | [`NavEvent::SubTabForward`] / [`NavEvent::SubTabBackward`] |
//! | `w` / `s` | [`NavEvent::ScrollBackward`] / [`NavEvent::ScrollForward`] |
//! | `Enter` / `Space` | [`NavEvent::Select`] |
//! | `Esc` / `q` / `Ctrl-C` | [`NavEvent::Quit`] |

use crossterm::event as cte;

/// Abstract directional input consumed by the tab engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavEvent {
    TabForward,
    TabBackward,
    SubTabForward,
    SubTabBackward,
    ScrollForward,
    ScrollBackward,
    Select,
    Quit,
}

impl NavEvent {
    /// Every event, in declaration order.
    pub const ALL: [NavEvent; 8] = [
        NavEvent::TabForward,
        NavEvent::TabBackward,
        NavEvent::SubTabForward,
        NavEvent::SubTabBackward,
        NavEvent::ScrollForward,
        NavEvent::ScrollBackward,
        NavEvent::Select,
        NavEvent::Quit,
    ];

    /// Direction carried by the event, if it has one.
    pub const fn is_forward(self) -> Option<bool> {
        match self {
            Self::TabForward | Self::SubTabForward | Self::ScrollForward => Some(true),
            Self::TabBackward | Self::SubTabBackward | Self::ScrollBackward => Some(false),
            Self::Select | Self::Quit => None,
        }
    }
}

/// Terminal input after translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Nav(NavEvent),
    /// Terminal was resized to `width` x `height` cells.
    Resize { width: u16, height: u16 },
}

/// Translate a crossterm event. Unbound keys and other events map to `None`.
pub fn map_event(event: cte::Event) -> Option<InputEvent> {
    match event {
        cte::Event::Key(key) => map_key(key).map(InputEvent::Nav),
        cte::Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

/// Translate a key press into a navigation event.
///
/// Key releases are ignored so terminals reporting both edges do not
/// double-step.
pub fn map_key(key: cte::KeyEvent) -> Option<NavEvent> {
    if key.kind == cte::KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(cte::KeyModifiers::CONTROL) {
        return matches!(key.code, cte::KeyCode::Char('c')).then_some(NavEvent::Quit);
    }
    match key.code {
        cte::KeyCode::Left => Some(NavEvent::TabBackward),
        cte::KeyCode::Right => Some(NavEvent::TabForward),
        cte::KeyCode::Up => Some(NavEvent::SubTabForward),
        cte::KeyCode::Down => Some(NavEvent::SubTabBackward),
        cte::KeyCode::Char('w' | 'W') => Some(NavEvent::ScrollBackward),
        cte::KeyCode::Char('s' | 'S') => Some(NavEvent::ScrollForward),
        cte::KeyCode::Enter | cte::KeyCode::Char(' ') => Some(NavEvent::Select),
        cte::KeyCode::Esc | cte::KeyCode::Char('q') => Some(NavEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: cte::KeyCode) -> cte::KeyEvent {
        cte::KeyEvent {
            code,
            modifiers: cte::KeyModifiers::NONE,
            kind: cte::KeyEventKind::Press,
            state: cte::KeyEventState::NONE,
        }
    }

    #[test]
    fn arrows_map_to_tab_and_subtab_moves() {
        assert_eq!(map_key(press(cte::KeyCode::Left)), Some(NavEvent::TabBackward));
        assert_eq!(map_key(press(cte::KeyCode::Right)), Some(NavEvent::TabForward));
        assert_eq!(map_key(press(cte::KeyCode::Up)), Some(NavEvent::SubTabForward));
        assert_eq!(map_key(press(cte::KeyCode::Down)), Some(NavEvent::SubTabBackward));
    }

    #[test]
    fn scroll_keys_are_case_insensitive() {
        assert_eq!(
            map_key(press(cte::KeyCode::Char('W'))),
            Some(NavEvent::ScrollBackward)
        );
        assert_eq!(
            map_key(press(cte::KeyCode::Char('s'))),
            Some(NavEvent::ScrollForward)
        );
    }

    #[test]
    fn enter_and_space_select() {
        assert_eq!(map_key(press(cte::KeyCode::Enter)), Some(NavEvent::Select));
        assert_eq!(map_key(press(cte::KeyCode::Char(' '))), Some(NavEvent::Select));
    }

    #[test]
    fn ctrl_c_quits_but_other_ctrl_chords_do_not() {
        let mut key = press(cte::KeyCode::Char('c'));
        key.modifiers = cte::KeyModifiers::CONTROL;
        assert_eq!(map_key(key), Some(NavEvent::Quit));

        let mut key = press(cte::KeyCode::Char('w'));
        key.modifiers = cte::KeyModifiers::CONTROL;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn release_is_ignored() {
        let mut key = press(cte::KeyCode::Right);
        key.kind = cte::KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn unbound_key_maps_to_none() {
        assert_eq!(map_key(press(cte::KeyCode::Char('z'))), None);
        assert_eq!(map_key(press(cte::KeyCode::F(5))), None);
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            map_event(cte::Event::Resize(80, 24)),
            Some(InputEvent::Resize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(map_event(cte::Event::FocusGained), None);
    }

    #[test]
    fn direction_of_events() {
        let forward = NavEvent::ALL
            .iter()
            .filter(|e| e.is_forward() == Some(true))
            .count();
        let backward = NavEvent::ALL
            .iter()
            .filter(|e| e.is_forward() == Some(false))
            .count();
        assert_eq!(forward, 3);
        assert_eq!(backward, 3);
        assert_eq!(NavEvent::Quit.is_forward(), None);
    }
}
