use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Release everything on focus loss; the matching release
                    // events go to whichever window has focus.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Pointer position as a pair, if the pointer is over the window.
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.pointer_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    fn release(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Released,
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::default(),
        })
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), code: 0, repeat: false }
    }

    // ── buttons ──────────────────────────────────────────────────────────

    #[test]
    fn press_records_transition_and_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Left, 10.0, 20.0));

        assert!(state.button_down(MouseButton::Left));
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));
        assert_eq!(state.pointer(), Some((10.0, 20.0)));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn repeated_press_is_one_transition() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Middle, 0.0, 0.0));
        frame.clear();
        state.apply_event(&mut frame, press(MouseButton::Middle, 0.0, 0.0));
        assert!(frame.buttons_pressed.is_empty());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, release(MouseButton::Right));
        assert!(frame.buttons_released.is_empty());
    }

    // ── focus / pointer ──────────────────────────────────────────────────

    #[test]
    fn focus_loss_clears_held_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, press(MouseButton::Left, 1.0, 1.0));
        state.apply_event(&mut frame, key(Key::Digit1, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.button_down(MouseButton::Left));
        assert!(!state.key_down(Key::Digit1));
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 3.0, y: 4.0 }));
        assert_eq!(state.pointer(), Some((3.0, 4.0)));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer(), None);
    }

    // ── frame ────────────────────────────────────────────────────────────

    #[test]
    fn wheel_lines_sum_over_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let wheel = |y| InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y },
            modifiers: Modifiers::default(),
        };
        state.apply_event(&mut frame, wheel(1.0));
        state.apply_event(&mut frame, wheel(2.0));
        assert_eq!(frame.wheel_lines(), 3.0);

        frame.clear();
        assert!(frame.is_empty());
        assert_eq!(frame.wheel_lines(), 0.0);
    }
}
