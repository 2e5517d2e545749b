//! macOS platform implementation.
//!
//! Requires Accessibility permissions (System Settings > Privacy &
//! Security > Accessibility) for the event tap.

pub mod keycodes;
mod listen;

pub use listen::{cursor_position, run_listener, run_listener_sliced, stop_listener};
