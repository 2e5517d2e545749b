//! Windows platform implementation.

pub mod keycodes;
mod listen;

pub use listen::{run_listener, stop_listener};
