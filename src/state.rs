//! Input state tables with frame-windowed edge detection.
//!
//! One [`InputState`] is owned (behind [`SharedState`]) by the currently
//! active backend. Backends never touch the tables directly: every OS event
//! is translated into an [`InputEvent`] and funneled through
//! [`InputState::apply`], so edge semantics are identical whether the events
//! come from a callback-driven hook or a polling loop.

use crate::clock::FrameClock;
use crate::keycode::{Key, MouseButton};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Number of frames during which an edge is reported as "just" happened.
///
/// `is_*_just_pressed`/`is_*_just_released` hold for the frame the edge was
/// recorded on plus this many ticks after it.
pub const JUST_WINDOW_FRAMES: u64 = 1;

/// Last known cursor position in screen (or monitor-relative) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MousePosition {
    pub x: f64,
    pub y: f64,
}

impl MousePosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A translated input transition, ready for ingestion.
///
/// Produced by the platform translators; anything they cannot map to a
/// canonical code is discarded before an `InputEvent` is ever built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    JoyDown(u32),
    JoyUp(u32),
    MouseMove { x: f64, y: f64 },
    Wheel { delta: i32 },
}

/// Key, mouse and joypad state tables plus press/release edge frames.
#[derive(Debug)]
pub struct InputState {
    clock: FrameClock,

    key_state: HashMap<Key, bool>,
    key_pressed_frame: HashMap<Key, u64>,
    key_released_frame: HashMap<Key, u64>,

    mouse_state: HashMap<MouseButton, bool>,
    mouse_pressed_frame: HashMap<MouseButton, u64>,
    mouse_released_frame: HashMap<MouseButton, u64>,

    // Populated only through `apply`; no backend in this crate reads joypad
    // hardware, but actions may carry joypad triggers.
    joy_state: HashMap<u32, bool>,
    joy_pressed_frame: HashMap<u32, u64>,
    joy_released_frame: HashMap<u32, u64>,

    mouse_position: MousePosition,
    wheel_delta: i32,
}

impl InputState {
    /// Create empty tables reading frames from `clock`.
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            key_state: HashMap::new(),
            key_pressed_frame: HashMap::new(),
            key_released_frame: HashMap::new(),
            mouse_state: HashMap::new(),
            mouse_pressed_frame: HashMap::new(),
            mouse_released_frame: HashMap::new(),
            joy_state: HashMap::new(),
            joy_pressed_frame: HashMap::new(),
            joy_released_frame: HashMap::new(),
            mouse_position: MousePosition::default(),
            wheel_delta: 0,
        }
    }

    /// The frame number edges are stamped with.
    pub fn current_frame(&self) -> u64 {
        self.clock.current()
    }

    /// Apply one translated transition to the tables.
    ///
    /// Edges are transition-gated: a press edge is recorded only on an actual
    /// false→true change and a release edge only on true→false, so OS
    /// auto-repeat never refreshes a timestamp.
    pub fn apply(&mut self, event: InputEvent) {
        let frame = self.clock.current();
        match event {
            InputEvent::KeyDown(key) => {
                if !self.key_state.get(&key).copied().unwrap_or(false) {
                    self.key_state.insert(key, true);
                    self.key_pressed_frame.insert(key, frame);
                }
            }
            InputEvent::KeyUp(key) => {
                if self.key_state.get(&key).copied().unwrap_or(false) {
                    self.key_state.insert(key, false);
                    self.key_released_frame.insert(key, frame);
                }
            }
            InputEvent::ButtonDown(button) => {
                if !self.mouse_state.get(&button).copied().unwrap_or(false) {
                    self.mouse_state.insert(button, true);
                    self.mouse_pressed_frame.insert(button, frame);
                }
            }
            InputEvent::ButtonUp(button) => {
                if self.mouse_state.get(&button).copied().unwrap_or(false) {
                    self.mouse_state.insert(button, false);
                    self.mouse_released_frame.insert(button, frame);
                }
            }
            InputEvent::JoyDown(button) => {
                if !self.joy_state.get(&button).copied().unwrap_or(false) {
                    self.joy_state.insert(button, true);
                    self.joy_pressed_frame.insert(button, frame);
                }
            }
            InputEvent::JoyUp(button) => {
                if self.joy_state.get(&button).copied().unwrap_or(false) {
                    self.joy_state.insert(button, false);
                    self.joy_released_frame.insert(button, frame);
                }
            }
            InputEvent::MouseMove { x, y } => {
                self.mouse_position = MousePosition::new(x, y);
            }
            InputEvent::Wheel { delta } => {
                self.wheel_delta = delta;
            }
        }
    }

    /// Overwrite the cursor position (used by backends that re-query it).
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse_position = MousePosition::new(x, y);
    }

    pub fn mouse_position(&self) -> MousePosition {
        self.mouse_position
    }

    /// Last wheel rotation delta observed. Retained for completeness; not
    /// exposed through the facade.
    pub fn wheel_delta(&self) -> i32 {
        self.wheel_delta
    }

    fn in_window(&self, frame: Option<&u64>) -> bool {
        match frame {
            Some(&edge) => self.clock.current().saturating_sub(edge) <= JUST_WINDOW_FRAMES,
            None => false,
        }
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.key_state.get(&key).copied().unwrap_or(false)
    }

    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.in_window(self.key_pressed_frame.get(&key))
    }

    pub fn is_key_just_released(&self, key: Key) -> bool {
        self.in_window(self.key_released_frame.get(&key))
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_state.get(&button).copied().unwrap_or(false)
    }

    pub fn is_mouse_just_pressed(&self, button: MouseButton) -> bool {
        self.in_window(self.mouse_pressed_frame.get(&button))
    }

    pub fn is_mouse_just_released(&self, button: MouseButton) -> bool {
        self.in_window(self.mouse_released_frame.get(&button))
    }

    pub fn is_joy_pressed(&self, button: u32) -> bool {
        self.joy_state.get(&button).copied().unwrap_or(false)
    }

    pub fn is_joy_just_pressed(&self, button: u32) -> bool {
        self.in_window(self.joy_pressed_frame.get(&button))
    }

    pub fn is_joy_just_released(&self, button: u32) -> bool {
        self.in_window(self.joy_released_frame.get(&button))
    }

    pub fn is_shift_pressed(&self) -> bool {
        self.is_key_pressed(Key::Shift)
    }

    pub fn is_ctrl_pressed(&self) -> bool {
        self.is_key_pressed(Key::Control)
    }

    pub fn is_alt_pressed(&self) -> bool {
        self.is_key_pressed(Key::Alt)
    }

    pub fn is_meta_pressed(&self) -> bool {
        self.is_key_pressed(Key::Meta)
    }

    /// Name-keyed set of currently held keys.
    pub fn keys_pressed_detailed(&self) -> HashMap<&'static str, bool> {
        self.key_state
            .iter()
            .filter(|&(_, &down)| down)
            .map(|(key, _)| (key.name(), true))
            .collect()
    }

    /// Name-keyed set of keys pressed within the just-window.
    pub fn keys_just_pressed_detailed(&self) -> HashMap<&'static str, bool> {
        self.key_pressed_frame
            .iter()
            .filter(|&(_, &frame)| self.clock.current().saturating_sub(frame) <= JUST_WINDOW_FRAMES)
            .map(|(key, _)| (key.name(), true))
            .collect()
    }

    /// Name-keyed set of keys released within the just-window.
    pub fn keys_just_released_detailed(&self) -> HashMap<&'static str, bool> {
        self.key_released_frame
            .iter()
            .filter(|&(_, &frame)| self.clock.current().saturating_sub(frame) <= JUST_WINDOW_FRAMES)
            .map(|(key, _)| (key.name(), true))
            .collect()
    }
}

/// The process-wide state lock shared between one backend's worker thread
/// and the consumer thread.
///
/// Cloning shares the same tables. A poisoned lock is recovered rather than
/// propagated; queries favor availability over signaling.
#[derive(Debug, Clone)]
pub struct SharedState {
    inner: Arc<Mutex<InputState>>,
}

impl SharedState {
    /// Fresh, empty tables on `clock`.
    pub fn new(clock: FrameClock) -> Self {
        Self {
            inner: Arc::new(Mutex::new(InputState::new(clock))),
        }
    }

    /// Lock the tables for the duration of a lookup or one ingested event.
    pub fn lock(&self) -> MutexGuard<'_, InputState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Translate-and-ingest helper for platform callbacks.
    pub fn apply(&self, event: InputEvent) {
        self.lock().apply(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> (FrameClock, InputState) {
        let clock = FrameClock::new();
        let state = InputState::new(clock.clone());
        (clock, state)
    }

    #[test]
    fn test_press_edge_window() {
        let (clock, mut state) = state();
        for _ in 0..10 {
            clock.advance();
        }
        state.apply(InputEvent::KeyDown(Key::Space));

        // Edge frame f = 10: just-pressed holds for f..=f+W.
        assert!(state.is_key_just_pressed(Key::Space));
        for _ in 0..JUST_WINDOW_FRAMES {
            clock.advance();
            assert!(state.is_key_just_pressed(Key::Space));
        }
        clock.advance();
        assert!(!state.is_key_just_pressed(Key::Space));
        assert!(state.is_key_pressed(Key::Space));
    }

    #[test]
    fn test_auto_repeat_does_not_refresh_edge() {
        let (clock, mut state) = state();
        state.apply(InputEvent::KeyDown(Key::A));
        clock.advance();
        clock.advance();
        // Repeated key-down while already held: timestamp must not move.
        state.apply(InputEvent::KeyDown(Key::A));
        assert!(!state.is_key_just_pressed(Key::A));
        assert!(state.is_key_pressed(Key::A));
    }

    #[test]
    fn test_release_requires_prior_press() {
        let (_clock, mut state) = state();
        state.apply(InputEvent::KeyUp(Key::B));
        assert!(!state.is_key_just_released(Key::B));
        state.apply(InputEvent::KeyDown(Key::B));
        state.apply(InputEvent::KeyUp(Key::B));
        assert!(state.is_key_just_released(Key::B));
        assert!(!state.is_key_pressed(Key::B));
    }

    #[test]
    fn test_press_release_same_tick_keeps_both_edges() {
        let (clock, mut state) = state();
        clock.advance();
        state.apply(InputEvent::KeyDown(Key::Enter));
        state.apply(InputEvent::KeyUp(Key::Enter));
        // Separate edge tables: both transitions stay observable.
        assert!(state.is_key_just_pressed(Key::Enter));
        assert!(state.is_key_just_released(Key::Enter));
        assert!(!state.is_key_pressed(Key::Enter));
    }

    #[test]
    fn test_mouse_button_edges() {
        let (clock, mut state) = state();
        state.apply(InputEvent::ButtonDown(MouseButton::Left));
        assert!(state.is_mouse_pressed(MouseButton::Left));
        assert!(state.is_mouse_just_pressed(MouseButton::Left));
        assert!(!state.is_mouse_pressed(MouseButton::Right));

        for _ in 0..=JUST_WINDOW_FRAMES {
            clock.advance();
        }
        assert!(!state.is_mouse_just_pressed(MouseButton::Left));

        state.apply(InputEvent::ButtonUp(MouseButton::Left));
        assert!(state.is_mouse_just_released(MouseButton::Left));
    }

    #[test]
    fn test_mouse_position_and_wheel() {
        let (_clock, mut state) = state();
        assert_eq!(state.mouse_position(), MousePosition::default());
        state.apply(InputEvent::MouseMove { x: 120.0, y: 45.5 });
        assert_eq!(state.mouse_position(), MousePosition::new(120.0, 45.5));
        state.apply(InputEvent::Wheel { delta: -3 });
        assert_eq!(state.wheel_delta(), -3);
    }

    #[test]
    fn test_modifier_queries_use_collapsed_codes() {
        let (_clock, mut state) = state();
        assert!(!state.is_shift_pressed());
        state.apply(InputEvent::KeyDown(Key::Shift));
        state.apply(InputEvent::KeyDown(Key::Meta));
        assert!(state.is_shift_pressed());
        assert!(state.is_meta_pressed());
        assert!(!state.is_ctrl_pressed());
        assert!(!state.is_alt_pressed());
    }

    #[test]
    fn test_detailed_maps() {
        let (clock, mut state) = state();
        clock.advance();
        state.apply(InputEvent::KeyDown(Key::W));
        state.apply(InputEvent::KeyDown(Key::Shift));
        state.apply(InputEvent::KeyUp(Key::W));

        let pressed = state.keys_pressed_detailed();
        assert_eq!(pressed.get("Shift"), Some(&true));
        assert!(!pressed.contains_key("W"));

        let just_pressed = state.keys_just_pressed_detailed();
        assert!(just_pressed.contains_key("W"));
        assert!(just_pressed.contains_key("Shift"));

        let just_released = state.keys_just_released_detailed();
        assert!(just_released.contains_key("W"));
        assert!(!just_released.contains_key("Shift"));

        for _ in 0..=JUST_WINDOW_FRAMES {
            clock.advance();
        }
        assert!(state.keys_just_pressed_detailed().is_empty());
        assert!(state.keys_just_released_detailed().is_empty());
    }

    #[test]
    fn test_joypad_tables() {
        let (_clock, mut state) = state();
        state.apply(InputEvent::JoyDown(2));
        assert!(state.is_joy_pressed(2));
        assert!(state.is_joy_just_pressed(2));
        state.apply(InputEvent::JoyUp(2));
        assert!(state.is_joy_just_released(2));
        assert!(!state.is_joy_pressed(2));
    }

    #[test]
    fn test_shared_state_clones_share_tables() {
        let shared = SharedState::new(FrameClock::new());
        let handle = shared.clone();
        handle.apply(InputEvent::KeyDown(Key::Q));
        assert!(shared.lock().is_key_pressed(Key::Q));
    }
}
