//! # pollhook
//!
//! OS-level (focus-independent) keyboard and mouse capture with a polling
//! query surface: frame-windowed edge detection and named-action matching
//! on top of per-platform hook backends.
//!
//! ## Features
//!
//! - Cross-platform capture (macOS, Windows, Linux) that sees input no
//!   matter which window has focus
//! - Polling queries instead of callbacks: `is_key_pressed`,
//!   `is_key_just_pressed`, `is_key_just_released` and the mouse/action
//!   equivalents, windowed by a host-driven frame clock
//! - Named actions bound to key, mouse or joypad triggers with exact
//!   modifier matching
//! - Selectable backends: a push-model generic hook everywhere, plus
//!   native polling backends per platform
//!
//! ## Quick Start
//!
//! ```no_run
//! use pollhook::{Hook, Key};
//!
//! let mut hook = Hook::new();
//! hook.start_hook();
//!
//! loop {
//!     hook.render_tick(); // once per host frame
//!     if hook.is_key_just_pressed(Key::Space) {
//!         println!("space went down this frame");
//!     }
//!     std::thread::sleep(std::time::Duration::from_millis(16));
//! }
//! ```
//!
//! ## Architecture
//!
//! Backends translate native codes into canonical [`Key`]/[`MouseButton`]
//! values and funnel every transition through [`InputState::apply`], so the
//! edge semantics are identical whether events are pushed by an OS callback
//! or pulled by a polling loop. The [`Hook`] facade owns the active backend,
//! the frame clock and the action map; see the [`backend`] module for the
//! selection rules.

pub mod action;
pub mod backend;
pub mod clock;
pub mod error;
pub mod hook;
pub mod keycode;
pub mod state;

mod platform;

// Re-exports
pub use action::{ActionMap, Modifiers, Trigger};
pub use backend::{Backend, BackendKind};
pub use clock::FrameClock;
pub use error::{Error, Result};
pub use hook::Hook;
pub use keycode::{Key, MouseButton};
pub use state::{InputEvent, InputState, JUST_WINDOW_FRAMES, MousePosition, SharedState};
