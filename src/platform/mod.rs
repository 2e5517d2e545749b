//! Platform-specific capture implementations.
//!
//! Each platform exposes the same pair: `run_listener` blocks in the OS
//! event loop and applies translated events to the shared tables, and
//! `stop_listener` unblocks it from another thread.

#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "macos")]
pub use macos::*;

#[cfg(target_os = "windows")]
pub mod windows;
#[cfg(target_os = "windows")]
pub use windows::*;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "linux")]
pub use linux::*;

// Ensure at least one platform is supported
#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
compile_error!("pollhook only supports macOS, Windows, and Linux");
