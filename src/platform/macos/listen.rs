//! macOS input capture using CGEventTap.
//!
//! Two run modes share the same tap plumbing: [`run_listener`] parks the
//! worker in `CFRunLoop::run` and is woken by [`stop_listener`], while
//! [`run_listener_sliced`] pumps the loop in 8 ms slices and re-queries the
//! cursor position between slices (mouse-move events can be coalesced away
//! under load; the query catches up regardless).

#![allow(improper_ctypes_definitions)]
#![allow(unsafe_op_in_unsafe_fn)]

use crate::error::{Error, Result};
use crate::platform::macos::keycodes::{mac_keycode_to_key, number_to_button};
use crate::state::{InputEvent, SharedState};
use core::ptr::NonNull;
use objc2_core_foundation::{
    CFMachPort, CFRetained, CFRunLoop, CFRunLoopSource, kCFRunLoopCommonModes,
    kCFRunLoopDefaultMode,
};
use objc2_core_graphics::{
    CGEvent, CGEventField, CGEventFlags, CGEventTapCallBack, CGEventTapLocation, CGEventTapOptions,
    CGEventTapPlacement, CGEventTapProxy, CGEventType, kCGEventMaskForAllEvents,
};
use objc2_foundation::NSAutoreleasePool;
use std::ffi::c_void;
use std::ptr::null_mut;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Run-loop slice length for the sliced mode.
const SLICE_SECONDS: f64 = 0.008;

/// Shared tables written by the tap callback.
static SHARED: Mutex<Option<SharedState>> = Mutex::new(None);

/// Flag to signal the run loop to stop.
static STOP_FLAG: Mutex<Option<Arc<AtomicBool>>> = Mutex::new(None);

/// Last seen flags for detecting modifier key press/release.
static LAST_FLAGS: Mutex<CGEventFlags> = Mutex::new(CGEventFlags(0));

/// Wrapper for a raw CFMachPort pointer that implements Send + Sync.
/// Safety: only accessed from the callback, which runs on the tap thread.
struct TapPointer(*const CFMachPort);
unsafe impl Send for TapPointer {}
unsafe impl Sync for TapPointer {}

/// Stored event tap for timeout recovery.
static EVENT_TAP: Mutex<Option<TapPointer>> = Mutex::new(None);

/// Wrapper for the worker's run loop so `stop_listener` can reach it.
struct LoopPointer(*const CFRunLoop);
unsafe impl Send for LoopPointer {}
unsafe impl Sync for LoopPointer {}

static RUN_LOOP: Mutex<Option<LoopPointer>> = Mutex::new(None);

#[link(name = "Cocoa", kind = "framework")]
unsafe extern "C" {}

/// The CGEventTap callback.
unsafe extern "C-unwind" fn event_callback(
    _proxy: CGEventTapProxy,
    event_type: CGEventType,
    cg_event: NonNull<CGEvent>,
    _user_info: *mut c_void,
) -> *mut CGEvent {
    if let Ok(guard) = STOP_FLAG.lock()
        && let Some(ref flag) = *guard
        && !flag.load(Ordering::SeqCst)
    {
        if let Some(run_loop) = CFRunLoop::current() {
            run_loop.stop();
        }
        return cg_event.as_ptr();
    }

    // macOS disables the tap if the callback is too slow; re-enable it.
    if event_type == CGEventType::TapDisabledByTimeout
        || event_type == CGEventType::TapDisabledByUserInput
    {
        if let Ok(guard) = EVENT_TAP.lock()
            && let Some(ref tap_ptr) = *guard
        {
            log::warn!("Event tap was disabled (timeout or user input), re-enabling...");
            if !tap_ptr.0.is_null() {
                CGEvent::tap_enable(&*tap_ptr.0, true);
            }
        }
        return cg_event.as_ptr();
    }

    if let Some(event) = convert_event(event_type, cg_event)
        && let Ok(guard) = SHARED.lock()
        && let Some(ref shared) = *guard
    {
        shared.apply(event);
    }

    cg_event.as_ptr()
}

/// Convert a CGEvent to a canonical event.
unsafe fn convert_event(event_type: CGEventType, cg_event: NonNull<CGEvent>) -> Option<InputEvent> {
    match event_type {
        CGEventType::KeyDown => {
            let code = CGEvent::integer_value_field(
                Some(cg_event.as_ref()),
                CGEventField::KeyboardEventKeycode,
            );
            mac_keycode_to_key(code as u16).map(InputEvent::KeyDown)
        }

        CGEventType::KeyUp => {
            let code = CGEvent::integer_value_field(
                Some(cg_event.as_ref()),
                CGEventField::KeyboardEventKeycode,
            );
            mac_keycode_to_key(code as u16).map(InputEvent::KeyUp)
        }

        CGEventType::FlagsChanged => {
            // Modifiers never arrive as KeyDown/KeyUp; diff the flag word
            // against the last one to recover the transition.
            let flags = CGEvent::flags(Some(cg_event.as_ref()));
            let mut last = LAST_FLAGS.lock().ok()?;
            let prev = *last;
            *last = flags;
            drop(last);

            let pairs = [
                (CGEventFlags::MaskShift, crate::keycode::Key::Shift),
                (CGEventFlags::MaskControl, crate::keycode::Key::Control),
                (CGEventFlags::MaskAlternate, crate::keycode::Key::Alt),
                (CGEventFlags::MaskCommand, crate::keycode::Key::Meta),
            ];
            for (mask, key) in pairs {
                let now = flags.contains(mask);
                let was = prev.contains(mask);
                if now != was {
                    return Some(if now {
                        InputEvent::KeyDown(key)
                    } else {
                        InputEvent::KeyUp(key)
                    });
                }
            }
            None
        }

        CGEventType::LeftMouseDown => Some(InputEvent::ButtonDown(crate::keycode::MouseButton::Left)),
        CGEventType::LeftMouseUp => Some(InputEvent::ButtonUp(crate::keycode::MouseButton::Left)),
        CGEventType::RightMouseDown => {
            Some(InputEvent::ButtonDown(crate::keycode::MouseButton::Right))
        }
        CGEventType::RightMouseUp => Some(InputEvent::ButtonUp(crate::keycode::MouseButton::Right)),

        CGEventType::OtherMouseDown => {
            let button_num = CGEvent::integer_value_field(
                Some(cg_event.as_ref()),
                CGEventField::MouseEventButtonNumber,
            );
            number_to_button(button_num).map(InputEvent::ButtonDown)
        }

        CGEventType::OtherMouseUp => {
            let button_num = CGEvent::integer_value_field(
                Some(cg_event.as_ref()),
                CGEventField::MouseEventButtonNumber,
            );
            number_to_button(button_num).map(InputEvent::ButtonUp)
        }

        CGEventType::MouseMoved
        | CGEventType::LeftMouseDragged
        | CGEventType::RightMouseDragged
        | CGEventType::OtherMouseDragged => {
            let point = CGEvent::location(Some(cg_event.as_ref()));
            Some(InputEvent::MouseMove {
                x: point.x,
                y: point.y,
            })
        }

        CGEventType::ScrollWheel => {
            let delta_y = CGEvent::integer_value_field(
                Some(cg_event.as_ref()),
                CGEventField::ScrollWheelEventDeltaAxis1,
            );
            (delta_y != 0).then_some(InputEvent::Wheel {
                delta: delta_y as i32,
            })
        }

        _ => None,
    }
}

/// Current cursor position queried from the window server.
pub fn cursor_position() -> Option<(f64, f64)> {
    let event = CGEvent::new(None)?;
    let point = CGEvent::location(Some(&event));
    Some((point.x, point.y))
}

/// Install the tap on the calling thread's run loop.
fn install_tap(
    running: &Arc<AtomicBool>,
    shared: SharedState,
) -> Result<(CFRetained<CFMachPort>, CFRetained<CFRunLoopSource>)> {
    {
        let mut s = SHARED
            .lock()
            .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
        *s = Some(shared);
    }
    {
        let mut s = STOP_FLAG
            .lock()
            .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
        *s = Some(running.clone());
    }
    {
        let mut f = LAST_FLAGS
            .lock()
            .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
        *f = CGEventFlags(0);
    }

    unsafe {
        let callback: CGEventTapCallBack = Some(event_callback);
        let tap = CGEvent::tap_create(
            CGEventTapLocation::HIDEventTap,
            CGEventTapPlacement::HeadInsertEventTap,
            CGEventTapOptions::ListenOnly,
            kCGEventMaskForAllEvents.into(),
            callback,
            null_mut(),
        )
        .ok_or_else(|| {
            Error::PermissionDenied(
                "Failed to create event tap. Make sure Accessibility permissions are granted."
                    .into(),
            )
        })?;

        {
            let mut tap_guard = EVENT_TAP
                .lock()
                .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
            *tap_guard = Some(TapPointer(&*tap as *const CFMachPort));
        }

        let source = CFMachPort::new_run_loop_source(None, Some(&tap), 0)
            .ok_or_else(|| Error::HookStartFailed("Failed to create run loop source".into()))?;

        let current_loop = CFRunLoop::current()
            .ok_or_else(|| Error::HookStartFailed("Failed to get current run loop".into()))?;

        current_loop.add_source(Some(&source), kCFRunLoopCommonModes);
        CGEvent::tap_enable(&tap, true);

        {
            let mut rl = RUN_LOOP
                .lock()
                .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
            *rl = Some(LoopPointer(&*current_loop as *const CFRunLoop));
        }

        Ok((tap, source))
    }
}

fn clear_statics() {
    if let Ok(mut s) = SHARED.lock() {
        *s = None;
    }
    if let Ok(mut s) = STOP_FLAG.lock() {
        *s = None;
    }
    if let Ok(mut t) = EVENT_TAP.lock() {
        *t = None;
    }
    if let Ok(mut rl) = RUN_LOOP.lock() {
        *rl = None;
    }
}

/// Run the event listener (blocking) until [`stop_listener`] is called.
pub fn run_listener(running: &Arc<AtomicBool>, shared: SharedState) -> Result<()> {
    unsafe {
        let _pool = NSAutoreleasePool::new();
        let (_tap, _source) = install_tap(running, shared)?;
        // A stop issued before install_tap published the run loop stopped
        // nothing; re-check the flag before parking.
        if !running.load(Ordering::SeqCst) {
            clear_statics();
            return Ok(());
        }
        CFRunLoop::run();
    }
    clear_statics();
    Ok(())
}

/// Run the event listener in bounded slices, re-querying the cursor
/// position between slices, until `running` clears.
pub fn run_listener_sliced(running: &Arc<AtomicBool>, shared: SharedState) -> Result<()> {
    unsafe {
        let _pool = NSAutoreleasePool::new();
        let (_tap, _source) = install_tap(running, shared.clone())?;

        while running.load(Ordering::SeqCst) {
            let _ = CFRunLoop::run_in_mode(kCFRunLoopDefaultMode, SLICE_SECONDS, true);
            if let Some((x, y)) = cursor_position() {
                shared.apply(InputEvent::MouseMove { x, y });
            }
        }
    }
    clear_statics();
    Ok(())
}

/// Stop the event listener by stopping the worker's run loop.
pub fn stop_listener() {
    if let Ok(guard) = RUN_LOOP.lock()
        && let Some(ref ptr) = *guard
        && !ptr.0.is_null()
    {
        unsafe { (&*ptr.0).stop() };
    }
}
