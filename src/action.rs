//! Named actions and the modifier/trigger matcher.
//!
//! Action definitions are owned by the host: the matcher only consumes an
//! ordered trigger list per action name. Triggers are ORed; the first one
//! satisfied decides the whole action.

use crate::keycode::{Key, MouseButton};
use crate::state::InputState;
use std::collections::HashMap;

/// Modifier flags recorded on a trigger when the binding was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers required.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// One trigger of a named action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A keyboard key with recorded modifier requirements.
    Key { key: Key, modifiers: Modifiers },
    /// A mouse button with recorded modifier requirements.
    Mouse {
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// A joypad button; no modifier gating.
    Joypad { button: u32 },
}

/// Host-defined mapping from action names to ordered trigger lists.
///
/// Read-only to the matcher; an action with no triggers (or an unknown
/// action name) never fires.
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    actions: HashMap<String, Vec<Trigger>>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trigger to `action`, creating the action if needed.
    pub fn bind(&mut self, action: impl Into<String>, trigger: Trigger) -> &mut Self {
        self.actions.entry(action.into()).or_default().push(trigger);
        self
    }

    /// Remove an action and all its triggers.
    pub fn unbind(&mut self, action: &str) {
        self.actions.remove(action);
    }

    /// The ordered trigger list for `action`, empty when unknown.
    pub fn triggers(&self, action: &str) -> &[Trigger] {
        self.actions.get(action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Check a trigger's recorded modifier flags against live modifier state.
///
/// When the trigger's own key is one of the four modifiers, that recorded
/// flag is replaced by its live value first; otherwise a modifier key could
/// never trigger together with itself. All four flags must then match
/// exactly.
pub(crate) fn modifiers_match(state: &InputState, trigger: &Trigger) -> bool {
    let (mut recorded, key) = match trigger {
        Trigger::Key { key, modifiers } => (*modifiers, Some(*key)),
        Trigger::Mouse { modifiers, .. } => (*modifiers, None),
        Trigger::Joypad { .. } => return true,
    };

    let shift_now = state.is_shift_pressed();
    let ctrl_now = state.is_ctrl_pressed();
    let alt_now = state.is_alt_pressed();
    let meta_now = state.is_meta_pressed();

    match key {
        Some(Key::Shift) => recorded.shift = shift_now,
        Some(Key::Control) => recorded.ctrl = ctrl_now,
        Some(Key::Alt) => recorded.alt = alt_now,
        Some(Key::Meta) => recorded.meta = meta_now,
        _ => {}
    }

    recorded.shift == shift_now
        && recorded.ctrl == ctrl_now
        && recorded.alt == alt_now
        && recorded.meta == meta_now
}

pub(crate) fn action_pressed(state: &InputState, triggers: &[Trigger]) -> bool {
    triggers.iter().any(|trigger| match trigger {
        Trigger::Key { key, .. } => state.is_key_pressed(*key) && modifiers_match(state, trigger),
        Trigger::Mouse { button, .. } => {
            state.is_mouse_pressed(*button) && modifiers_match(state, trigger)
        }
        Trigger::Joypad { button } => state.is_joy_pressed(*button),
    })
}

pub(crate) fn action_just_pressed(state: &InputState, triggers: &[Trigger]) -> bool {
    triggers.iter().any(|trigger| match trigger {
        Trigger::Key { key, .. } => {
            state.is_key_just_pressed(*key) && modifiers_match(state, trigger)
        }
        Trigger::Mouse { button, .. } => {
            state.is_mouse_just_pressed(*button) && modifiers_match(state, trigger)
        }
        Trigger::Joypad { button } => state.is_joy_just_pressed(*button),
    })
}

pub(crate) fn action_just_released(state: &InputState, triggers: &[Trigger]) -> bool {
    triggers.iter().any(|trigger| match trigger {
        Trigger::Key { key, .. } => {
            state.is_key_just_released(*key) && modifiers_match(state, trigger)
        }
        Trigger::Mouse { button, .. } => {
            state.is_mouse_just_released(*button) && modifiers_match(state, trigger)
        }
        Trigger::Joypad { button } => state.is_joy_just_released(*button),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameClock;
    use crate::state::InputEvent;

    fn state() -> (FrameClock, InputState) {
        let clock = FrameClock::new();
        let state = InputState::new(clock.clone());
        (clock, state)
    }

    fn key_trigger(key: Key, modifiers: Modifiers) -> Trigger {
        Trigger::Key { key, modifiers }
    }

    #[test]
    fn test_modifiers_must_match_exactly() {
        let (_clock, mut state) = state();
        let plain = key_trigger(Key::Space, Modifiers::NONE);
        let shifted = key_trigger(
            Key::Space,
            Modifiers {
                shift: true,
                ..Modifiers::NONE
            },
        );

        assert!(modifiers_match(&state, &plain));
        assert!(!modifiers_match(&state, &shifted));

        state.apply(InputEvent::KeyDown(Key::Shift));
        assert!(!modifiers_match(&state, &plain));
        assert!(modifiers_match(&state, &shifted));
    }

    #[test]
    fn test_trigger_that_is_itself_a_modifier() {
        let (_clock, mut state) = state();
        // Recorded flags are stale for the trigger's own key; the live value
        // must win for that one flag.
        let shift_trigger = key_trigger(Key::Shift, Modifiers::NONE);
        state.apply(InputEvent::KeyDown(Key::Shift));
        assert!(modifiers_match(&state, &shift_trigger));
        assert!(action_pressed(&state, &[shift_trigger]));

        // A second, unrelated live modifier still fails the match.
        state.apply(InputEvent::KeyDown(Key::Control));
        assert!(!modifiers_match(&state, &shift_trigger));
    }

    #[test]
    fn test_mouse_trigger_has_no_substitution() {
        let (_clock, mut state) = state();
        let trigger = Trigger::Mouse {
            button: MouseButton::Left,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        };
        state.apply(InputEvent::ButtonDown(MouseButton::Left));
        assert!(!action_pressed(&state, &[trigger]));
        state.apply(InputEvent::KeyDown(Key::Control));
        assert!(action_pressed(&state, &[trigger]));
    }

    #[test]
    fn test_empty_trigger_list_never_fires() {
        let (_clock, state) = state();
        assert!(!action_pressed(&state, &[]));
        assert!(!action_just_pressed(&state, &[]));
        assert!(!action_just_released(&state, &[]));
    }

    #[test]
    fn test_or_semantics_over_triggers() {
        let (_clock, mut state) = state();
        let triggers = [
            key_trigger(Key::W, Modifiers::NONE),
            key_trigger(Key::Up, Modifiers::NONE),
            Trigger::Joypad { button: 11 },
        ];

        assert!(!action_pressed(&state, &triggers));
        state.apply(InputEvent::KeyDown(Key::Up));
        assert!(action_pressed(&state, &triggers));

        state.apply(InputEvent::KeyUp(Key::Up));
        state.apply(InputEvent::JoyDown(11));
        assert!(action_pressed(&state, &triggers));
    }

    #[test]
    fn test_joypad_triggers_skip_modifier_gating() {
        let (_clock, mut state) = state();
        let trigger = Trigger::Joypad { button: 0 };
        state.apply(InputEvent::KeyDown(Key::Alt));
        state.apply(InputEvent::JoyDown(0));
        assert!(action_pressed(&state, &[trigger]));
    }

    #[test]
    fn test_stray_modifier_blocks_plain_binding() {
        // Bind "jump" to Space with no modifiers; holding Shift must block
        // it until Shift is released and Space is pressed again.
        let (clock, mut state) = state();
        let jump = [key_trigger(Key::Space, Modifiers::NONE)];

        state.apply(InputEvent::KeyDown(Key::Shift));
        for _ in 0..10 {
            clock.advance();
        }
        state.apply(InputEvent::KeyDown(Key::Space));
        clock.advance();
        assert!(!action_pressed(&state, &jump));
        assert!(!action_just_pressed(&state, &jump));

        state.apply(InputEvent::KeyUp(Key::Shift));
        state.apply(InputEvent::KeyUp(Key::Space));
        clock.advance();
        state.apply(InputEvent::KeyDown(Key::Space));
        assert!(action_pressed(&state, &jump));
        assert!(action_just_pressed(&state, &jump));
    }

    #[test]
    fn test_just_released_with_modifiers() {
        let (clock, mut state) = state();
        let trigger = [key_trigger(Key::Q, Modifiers::NONE)];
        state.apply(InputEvent::KeyDown(Key::Q));
        clock.advance();
        state.apply(InputEvent::KeyUp(Key::Q));
        assert!(action_just_released(&state, &trigger));
        // Modifier pressed after the release still fails the live match.
        state.apply(InputEvent::KeyDown(Key::Meta));
        assert!(!action_just_released(&state, &trigger));
    }

    #[test]
    fn test_action_map_bind_and_lookup() {
        let mut map = ActionMap::new();
        map.bind("jump", key_trigger(Key::Space, Modifiers::NONE))
            .bind("jump", Trigger::Joypad { button: 0 });

        assert_eq!(map.triggers("jump").len(), 2);
        assert!(map.triggers("missing").is_empty());

        map.unbind("jump");
        assert!(map.triggers("jump").is_empty());
    }
}
