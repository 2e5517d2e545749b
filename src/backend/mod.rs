//! Backend capability interface and selection.
//!
//! A backend owns exactly one OS event source and one worker thread, and
//! writes into the [`SharedState`](crate::state::SharedState) handed to it
//! at construction. At most one backend is alive per
//! [`Hook`](crate::hook::Hook); swapping goes through a full stop (with the
//! worker joined) before the replacement starts.

use crate::error::Result;
use crate::state::SharedState;

pub mod generic;

#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "windows")]
pub mod windows;
#[cfg(all(target_os = "linux", feature = "evdev"))]
pub mod x11;

/// Identity of a concrete backend implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Push-model hook over the platform's native event tap.
    Generic,
    /// Windows `GetAsyncKeyState` polling loop.
    Windows,
    /// Linux `/dev/input` polling loop with X11 cursor queries.
    X11,
    /// macOS CGEventTap with bounded run-loop slices.
    Macos,
}

impl BackendKind {
    /// The name this backend is selected by.
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Generic => "generic-hook",
            BackendKind::Windows => "windows",
            BackendKind::X11 => "x11",
            BackendKind::Macos => "macos",
        }
    }
}

/// The hook capability every platform implementation provides.
///
/// `start` and `stop` are idempotent. `stop` blocks until the worker thread
/// has joined so a swap never races an in-flight worker against its
/// replacement.
pub trait Backend: Send {
    fn kind(&self) -> BackendKind;

    /// Acquire OS resources and spawn the worker. Failures to acquire the
    /// event source inside the worker are logged and leave the backend
    /// running with empty tables.
    fn start(&mut self) -> Result<()>;

    /// Signal the worker, join it, release OS resources.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// Resolve a requested backend name to the implementation that will serve
/// it. Native names are honored only on builds that carry them; everything
/// else falls back to the generic hook.
pub fn resolve(name: &str) -> BackendKind {
    match name {
        "windows" if cfg!(target_os = "windows") => BackendKind::Windows,
        "x11" if cfg!(all(target_os = "linux", feature = "evdev")) => BackendKind::X11,
        "macos" if cfg!(target_os = "macos") => BackendKind::Macos,
        _ => BackendKind::Generic,
    }
}

/// Construct the backend for `kind` over `shared`.
pub fn create(kind: BackendKind, shared: SharedState) -> Box<dyn Backend> {
    match kind {
        #[cfg(target_os = "windows")]
        BackendKind::Windows => Box::new(windows::WindowsBackend::new(shared)),
        #[cfg(all(target_os = "linux", feature = "evdev"))]
        BackendKind::X11 => Box::new(x11::X11Backend::new(shared)),
        #[cfg(target_os = "macos")]
        BackendKind::Macos => Box::new(macos::MacosBackend::new(shared)),
        _ => Box::new(generic::GenericBackend::new(shared)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(BackendKind::Generic.name(), "generic-hook");
        assert_eq!(BackendKind::Windows.name(), "windows");
        assert_eq!(BackendKind::X11.name(), "x11");
        assert_eq!(BackendKind::Macos.name(), "macos");
    }

    #[test]
    fn test_unknown_names_resolve_to_generic() {
        assert_eq!(resolve("default"), BackendKind::Generic);
        assert_eq!(resolve("generic-hook"), BackendKind::Generic);
        assert_eq!(resolve("no-such-backend"), BackendKind::Generic);
    }

    #[test]
    fn test_foreign_native_names_fall_back() {
        #[cfg(not(target_os = "windows"))]
        assert_eq!(resolve("windows"), BackendKind::Generic);
        #[cfg(not(target_os = "macos"))]
        assert_eq!(resolve("macos"), BackendKind::Generic);
        #[cfg(not(all(target_os = "linux", feature = "evdev")))]
        assert_eq!(resolve("x11"), BackendKind::Generic);
    }

    #[cfg(all(target_os = "linux", feature = "evdev"))]
    #[test]
    fn test_native_name_resolves_on_matching_build() {
        assert_eq!(resolve("x11"), BackendKind::X11);
    }
}
