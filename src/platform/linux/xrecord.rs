//! X11 input capture using the XRecord extension.

use crate::error::{Error, Result};
use crate::platform::linux::keycodes::{x11_button_to_button, x11_keycode_to_key};
use crate::state::{InputEvent, SharedState};
use std::os::raw::{c_char, c_int, c_uchar, c_ulong};
use std::ptr::null;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use x11::xlib;
use x11::xrecord;

/// Shared tables written by the record callback.
static SHARED: Mutex<Option<SharedState>> = Mutex::new(None);

/// Flag to signal stopping.
static STOP_FLAG: Mutex<Option<Arc<AtomicBool>>> = Mutex::new(None);

/// XRecord context, needed by `stop_listener` to unblock the data loop.
static CONTEXT: Mutex<Option<xrecord::XRecordContext>> = Mutex::new(None);

const FALSE: c_int = 0;

/// XRecord wire layout for device events.
#[repr(C)]
struct XRecordDatum {
    type_: u8,
    code: u8,
    _rest: u64,
    _1: bool,
    _2: bool,
    _3: bool,
    root_x: i16,
    root_y: i16,
    _event_x: i16,
    _event_y: i16,
    _state: u16,
}

/// Translate one recorded device event.
fn convert_event(type_: c_int, code: u8, x: f64, y: f64) -> Option<InputEvent> {
    match type_ {
        t if t == xlib::KeyPress => x11_keycode_to_key(code).map(InputEvent::KeyDown),
        t if t == xlib::KeyRelease => x11_keycode_to_key(code).map(InputEvent::KeyUp),

        t if t == xlib::ButtonPress => match code {
            // Wheel motion arrives as button presses 4..=7; only the
            // vertical axis feeds the wheel accumulator.
            4 => Some(InputEvent::Wheel { delta: 1 }),
            5 => Some(InputEvent::Wheel { delta: -1 }),
            6 | 7 => None,
            c => x11_button_to_button(c).map(InputEvent::ButtonDown),
        },

        t if t == xlib::ButtonRelease => match code {
            4..=7 => None,
            c => x11_button_to_button(c).map(InputEvent::ButtonUp),
        },

        t if t == xlib::MotionNotify => Some(InputEvent::MouseMove { x, y }),

        _ => None,
    }
}

unsafe extern "C" fn record_callback(
    _null: *mut c_char,
    raw_data: *mut xrecord::XRecordInterceptData,
) {
    unsafe {
        let data = match raw_data.as_ref() {
            Some(d) => d,
            None => return,
        };

        if data.category != xrecord::XRecordFromServer {
            xrecord::XRecordFreeData(raw_data);
            return;
        }

        if let Ok(guard) = STOP_FLAG.lock()
            && let Some(ref flag) = *guard
            && !flag.load(Ordering::SeqCst)
        {
            xrecord::XRecordFreeData(raw_data);
            return;
        }

        #[allow(clippy::cast_ptr_alignment)]
        let xdatum = match (data.data as *const XRecordDatum).as_ref() {
            Some(d) => d,
            None => {
                xrecord::XRecordFreeData(raw_data);
                return;
            }
        };

        if let Some(event) = convert_event(
            xdatum.type_ as c_int,
            xdatum.code,
            xdatum.root_x as f64,
            xdatum.root_y as f64,
        ) && let Ok(guard) = SHARED.lock()
            && let Some(ref shared) = *guard
        {
            shared.apply(event);
        }

        xrecord::XRecordFreeData(raw_data);
    }
}

fn clear_statics() {
    if let Ok(mut s) = SHARED.lock() {
        *s = None;
    }
    if let Ok(mut s) = STOP_FLAG.lock() {
        *s = None;
    }
    if let Ok(mut c) = CONTEXT.lock() {
        *c = None;
    }
}

/// Run the event listener (blocking).
pub fn run_listener(running: &Arc<AtomicBool>, shared: SharedState) -> Result<()> {
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

    unsafe {
        let dpy_control = xlib::XOpenDisplay(null());
        if dpy_control.is_null() {
            return Err(Error::HookStartFailed("Failed to open X display".into()));
        }

        let extension_name = c"RECORD";
        let extension = xlib::XInitExtension(dpy_control, extension_name.as_ptr());
        if extension.is_null() {
            xlib::XCloseDisplay(dpy_control);
            return Err(Error::HookStartFailed(
                "XRecord extension not available".into(),
            ));
        }

        let mut record_range: xrecord::XRecordRange = *xrecord::XRecordAllocRange();
        record_range.device_events.first = xlib::KeyPress as c_uchar;
        record_range.device_events.last = xlib::MotionNotify as c_uchar;

        let mut record_all_clients: c_ulong = xrecord::XRecordAllClients;
        let context = xrecord::XRecordCreateContext(
            dpy_control,
            0,
            &mut record_all_clients,
            1,
            &mut &mut record_range as *mut &mut xrecord::XRecordRange
                as *mut *mut xrecord::XRecordRange,
            1,
        );

        if context == 0 {
            xlib::XCloseDisplay(dpy_control);
            return Err(Error::HookStartFailed(
                "Failed to create XRecord context".into(),
            ));
        }

        xlib::XSync(dpy_control, FALSE);

        {
            let mut c = CONTEXT
                .lock()
                .map_err(|_| Error::ThreadError("context mutex poisoned".into()))?;
            *c = Some(context);
        }

        // A stop issued before the context was published finds CONTEXT
        // empty and disables nothing; re-check the flag now that the
        // context is visible, or the data loop below could never unblock.
        if !running.load(Ordering::SeqCst) {
            xrecord::XRecordFreeContext(dpy_control, context);
            xlib::XCloseDisplay(dpy_control);
            clear_statics();
            return Ok(());
        }

        // Blocks until the context is disabled from another connection.
        let result =
            xrecord::XRecordEnableContext(dpy_control, context, Some(record_callback), &mut 0);

        xrecord::XRecordDisableContext(dpy_control, context);
        xrecord::XRecordFreeContext(dpy_control, context);
        xlib::XCloseDisplay(dpy_control);

        if result == 0 {
            clear_statics();
            return Err(Error::HookStartFailed(
                "Failed to enable XRecord context".into(),
            ));
        }
    }

    clear_statics();

    Ok(())
}

/// Stop the event listener.
///
/// XRecordDisableContext has to be issued from a separate control
/// connection to unblock XRecordEnableContext on the data connection.
pub fn stop_listener() {
    if let Ok(guard) = STOP_FLAG.lock()
        && let Some(ref flag) = *guard
    {
        flag.store(false, Ordering::SeqCst);
    }

    unsafe {
        if let Ok(ctx_guard) = CONTEXT.lock()
            && let Some(ctx) = *ctx_guard
        {
            let dpy_control = xlib::XOpenDisplay(null());
            if !dpy_control.is_null() {
                xrecord::XRecordDisableContext(dpy_control, ctx);
                xlib::XCloseDisplay(dpy_control);
            }
        }
    }
}
