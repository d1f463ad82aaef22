//! Input processing layer: key mapping and the two-key jump-to-top gesture.
//!
//! Pure logic, no I/O. All functions are deterministic and testable.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions produced by key input processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Action {
    Quit,
    LineDown,
    LineUp,
    HalfPageDown,
    HalfPageUp,
    JumpToTop,
    JumpToBottom,
}

/// Tracks the pending half of the `gg` jump-to-top gesture.
///
/// A single `g` arms the gesture; a second consecutive `g` fires it. Any
/// other key in between disarms it, so `g x g` does not jump.
pub(super) struct GestureState {
    leading_g: bool,
}

impl GestureState {
    pub(super) fn new() -> Self {
        Self { leading_g: false }
    }

    fn take(&mut self) -> bool {
        std::mem::take(&mut self.leading_g)
    }
}

/// Map a key event to an `Action`, consuming/updating the gesture state.
///
/// Returns `None` for unknown keys and for the first half of `gg`.
pub(super) fn map_key_event(key: KeyEvent, gesture: &mut GestureState) -> Option<Action> {
    let armed = gesture.take();

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            Some(Action::Quit)
        }

        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(Action::LineDown),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) | (KeyCode::Enter, _) => Some(Action::LineUp),

        (KeyCode::Char('d'), _) | (KeyCode::PageDown, _) => Some(Action::HalfPageDown),
        (KeyCode::Char('u'), _) | (KeyCode::PageUp, _) => Some(Action::HalfPageUp),

        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            if armed {
                Some(Action::JumpToTop)
            } else {
                gesture.leading_g = true;
                None
            }
        }
        (KeyCode::Char('G'), _) => Some(Action::JumpToBottom),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn simple_key(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_j_scrolls_down() {
        let mut g = GestureState::new();
        let a = map_key_event(simple_key(KeyCode::Char('j')), &mut g);
        assert_eq!(a, Some(Action::LineDown));
    }

    #[test]
    fn test_enter_scrolls_up() {
        let mut g = GestureState::new();
        let a = map_key_event(simple_key(KeyCode::Enter), &mut g);
        assert_eq!(a, Some(Action::LineUp));
    }

    #[test]
    fn test_double_g_jumps_top() {
        let mut g = GestureState::new();
        assert_eq!(map_key_event(simple_key(KeyCode::Char('g')), &mut g), None);
        assert_eq!(
            map_key_event(simple_key(KeyCode::Char('g')), &mut g),
            Some(Action::JumpToTop)
        );
    }

    #[test]
    fn test_gg_consumed_third_g_only_rearms() {
        let mut g = GestureState::new();
        map_key_event(simple_key(KeyCode::Char('g')), &mut g);
        assert_eq!(
            map_key_event(simple_key(KeyCode::Char('g')), &mut g),
            Some(Action::JumpToTop)
        );
        // Gesture was consumed: a third g starts over, it does not retrigger.
        assert_eq!(map_key_event(simple_key(KeyCode::Char('g')), &mut g), None);
    }

    #[test]
    fn test_interleaved_key_disarms_gesture() {
        let mut g = GestureState::new();
        map_key_event(simple_key(KeyCode::Char('g')), &mut g);
        map_key_event(simple_key(KeyCode::Char('x')), &mut g);
        assert_eq!(map_key_event(simple_key(KeyCode::Char('g')), &mut g), None);
    }

    #[test]
    fn test_known_key_also_disarms_gesture() {
        let mut g = GestureState::new();
        map_key_event(simple_key(KeyCode::Char('g')), &mut g);
        assert_eq!(
            map_key_event(simple_key(KeyCode::Char('j')), &mut g),
            Some(Action::LineDown)
        );
        assert_eq!(map_key_event(simple_key(KeyCode::Char('g')), &mut g), None);
    }

    #[test]
    fn test_q_quits() {
        let mut g = GestureState::new();
        let a = map_key_event(simple_key(KeyCode::Char('q')), &mut g);
        assert_eq!(a, Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut g = GestureState::new();
        let a = map_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut g);
        assert_eq!(a, Some(Action::Quit));
    }

    #[test]
    fn test_big_g_bottom() {
        let mut g = GestureState::new();
        let a = map_key_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT), &mut g);
        assert_eq!(a, Some(Action::JumpToBottom));
    }

    #[test]
    fn test_half_page_keys() {
        let mut g = GestureState::new();
        assert_eq!(
            map_key_event(simple_key(KeyCode::Char('d')), &mut g),
            Some(Action::HalfPageDown)
        );
        assert_eq!(
            map_key_event(simple_key(KeyCode::PageUp), &mut g),
            Some(Action::HalfPageUp)
        );
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let mut g = GestureState::new();
        let a = map_key_event(simple_key(KeyCode::Char('x')), &mut g);
        assert!(a.is_none());
    }
}
