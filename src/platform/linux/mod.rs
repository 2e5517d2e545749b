//! Linux platform implementation.
//!
//! Two capture paths:
//! - **evdev** (default): reads /dev/input directly, works on X11 and
//!   Wayland, needs membership in the `input` group
//! - **X11**: XRecord for the push listener, XQueryPointer for absolute
//!   cursor positions
//!
//! When both features are enabled the push listener prefers XRecord.

pub mod keycodes;

#[cfg(feature = "evdev")]
pub mod evdev;

#[cfg(feature = "x11")]
pub mod cursor;
#[cfg(feature = "x11")]
mod xrecord;

#[cfg(feature = "x11")]
pub use xrecord::{run_listener, stop_listener};

#[cfg(all(feature = "evdev", not(feature = "x11")))]
pub use evdev::{run_listener, stop_listener};

// If neither feature is enabled the push listener cannot start; it reports
// that instead of capturing nothing silently.
#[cfg(not(any(feature = "x11", feature = "evdev")))]
mod stub {
    use crate::error::{Error, Result};
    use crate::state::SharedState;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    pub fn run_listener(_running: &Arc<AtomicBool>, _shared: SharedState) -> Result<()> {
        Err(Error::NotSupported(
            "No Linux capture path enabled. Enable the 'x11' or 'evdev' feature.".into(),
        ))
    }

    pub fn stop_listener() {}
}

#[cfg(not(any(feature = "x11", feature = "evdev")))]
pub use stub::{run_listener, stop_listener};
