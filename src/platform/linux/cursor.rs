//! Absolute cursor position via XQueryPointer.
//!
//! evdev only reports relative pointer motion; polling backends that want
//! real screen coordinates query the X server for them instead.

use std::ptr::null;
use x11::xlib;

/// One X display connection held open for repeated pointer queries.
pub struct PointerProbe {
    display: *mut xlib::Display,
    root: xlib::Window,
}

// The probe is only ever used from the backend worker thread.
unsafe impl Send for PointerProbe {}

impl PointerProbe {
    /// Connect to the default display. Returns `None` when there is no X
    /// server (headless or Wayland without XWayland).
    pub fn open() -> Option<Self> {
        unsafe {
            let display = xlib::XOpenDisplay(null());
            if display.is_null() {
                return None;
            }
            let root = xlib::XDefaultRootWindow(display);
            Some(Self { display, root })
        }
    }

    /// Current pointer position in root-window coordinates.
    pub fn position(&self) -> Option<(i32, i32)> {
        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let mut root_x = 0;
        let mut root_y = 0;
        let mut win_x = 0;
        let mut win_y = 0;
        let mut mask = 0;

        let ok = unsafe {
            xlib::XQueryPointer(
                self.display,
                self.root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };

        (ok != 0).then_some((root_x, root_y))
    }
}

impl Drop for PointerProbe {
    fn drop(&mut self) {
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
    }
}
