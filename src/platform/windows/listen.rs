//! Windows input capture using SetWindowsHookEx.

use crate::error::{Error, Result};
use crate::state::{InputEvent, SharedState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, GetMessageW, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT, MSLLHOOKSTRUCT,
    PostThreadMessageW, SetWindowsHookExW, UnhookWindowsHookEx, WH_KEYBOARD_LL, WH_MOUSE_LL,
    WM_KEYDOWN, WM_KEYUP, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP,
    WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_QUIT, WM_RBUTTONDOWN, WM_RBUTTONUP, WM_SYSKEYDOWN,
    WM_SYSKEYUP, WM_XBUTTONDOWN, WM_XBUTTONUP,
};

use super::keycodes::vk_to_key;
use crate::keycode::MouseButton;

// Wrapper for HHOOK to make it Send + Sync
#[derive(Clone, Copy)]
struct SendableHHOOK(HHOOK);

// SAFETY: HHOOK is just a handle/pointer that the Windows API owns.
// It's safe to send between threads because Windows handles are thread-safe.
unsafe impl Send for SendableHHOOK {}
unsafe impl Sync for SendableHHOOK {}

const WHEEL_DELTA: i16 = 120;

/// Shared tables written by the hook callbacks.
static SHARED: Mutex<Option<SharedState>> = Mutex::new(None);

/// Flag to signal stopping.
static STOP_FLAG: Mutex<Option<Arc<AtomicBool>>> = Mutex::new(None);

/// Hook handles.
static KEYBOARD_HOOK: Mutex<Option<SendableHHOOK>> = Mutex::new(None);
static MOUSE_HOOK: Mutex<Option<SendableHHOOK>> = Mutex::new(None);

/// Thread ID for message posting.
static THREAD_ID: Mutex<u32> = Mutex::new(0);

unsafe fn get_vk_code(lpdata: LPARAM) -> u32 {
    let kb = unsafe { *(lpdata.0 as *const KBDLLHOOKSTRUCT) };
    kb.vkCode
}

unsafe fn get_mouse_point(lpdata: LPARAM) -> (i32, i32) {
    let mouse = unsafe { *(lpdata.0 as *const MSLLHOOKSTRUCT) };
    (mouse.pt.x, mouse.pt.y)
}

unsafe fn get_wheel_delta(lpdata: LPARAM) -> i16 {
    let mouse = unsafe { *(lpdata.0 as *const MSLLHOOKSTRUCT) };
    ((mouse.mouseData >> 16) & 0xFFFF) as i16
}

unsafe fn get_xbutton_code(lpdata: LPARAM) -> u8 {
    let mouse = unsafe { *(lpdata.0 as *const MSLLHOOKSTRUCT) };
    ((mouse.mouseData >> 16) & 0xFFFF) as u8
}

fn xbutton_to_button(xbutton: u8) -> Option<MouseButton> {
    match xbutton {
        1 => Some(MouseButton::X1),
        2 => Some(MouseButton::X2),
        _ => None,
    }
}

/// Convert a hook message to a canonical event.
unsafe fn convert_event(wparam: WPARAM, lparam: LPARAM) -> Option<InputEvent> {
    let msg = wparam.0 as u32;

    match msg {
        WM_KEYDOWN | WM_SYSKEYDOWN => {
            let code = unsafe { get_vk_code(lparam) };
            vk_to_key(code).map(InputEvent::KeyDown)
        }

        WM_KEYUP | WM_SYSKEYUP => {
            let code = unsafe { get_vk_code(lparam) };
            vk_to_key(code).map(InputEvent::KeyUp)
        }

        WM_LBUTTONDOWN => Some(InputEvent::ButtonDown(MouseButton::Left)),
        WM_LBUTTONUP => Some(InputEvent::ButtonUp(MouseButton::Left)),
        WM_RBUTTONDOWN => Some(InputEvent::ButtonDown(MouseButton::Right)),
        WM_RBUTTONUP => Some(InputEvent::ButtonUp(MouseButton::Right)),
        WM_MBUTTONDOWN => Some(InputEvent::ButtonDown(MouseButton::Middle)),
        WM_MBUTTONUP => Some(InputEvent::ButtonUp(MouseButton::Middle)),

        WM_XBUTTONDOWN => {
            let xbutton = unsafe { get_xbutton_code(lparam) };
            xbutton_to_button(xbutton).map(InputEvent::ButtonDown)
        }

        WM_XBUTTONUP => {
            let xbutton = unsafe { get_xbutton_code(lparam) };
            xbutton_to_button(xbutton).map(InputEvent::ButtonUp)
        }

        WM_MOUSEMOVE => {
            let (x, y) = unsafe { get_mouse_point(lparam) };
            Some(InputEvent::MouseMove {
                x: x as f64,
                y: y as f64,
            })
        }

        WM_MOUSEWHEEL => {
            let delta = unsafe { get_wheel_delta(lparam) };
            Some(InputEvent::Wheel {
                delta: (delta / WHEEL_DELTA) as i32,
            })
        }

        _ => None,
    }
}

fn dispatch(wparam: WPARAM, lparam: LPARAM) {
    // Stop requested while the hook thread is blocked in GetMessageW; post
    // WM_QUIT so the message loop wakes up and exits.
    if let Ok(guard) = STOP_FLAG.lock()
        && let Some(ref flag) = *guard
        && !flag.load(Ordering::SeqCst)
        && let Ok(thread_id) = THREAD_ID.lock()
    {
        let _ = unsafe { PostThreadMessageW(*thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) };
    }

    if let Some(event) = unsafe { convert_event(wparam, lparam) }
        && let Ok(guard) = SHARED.lock()
        && let Some(ref shared) = *guard
    {
        shared.apply(event);
    }
}

unsafe extern "system" fn keyboard_callback(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        dispatch(wparam, lparam);
    }
    let hook = KEYBOARD_HOOK.lock().ok().and_then(|g| g.map(|h| h.0));
    unsafe { CallNextHookEx(hook, code, wparam, lparam) }
}

unsafe extern "system" fn mouse_callback(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        dispatch(wparam, lparam);
    }
    let hook = MOUSE_HOOK.lock().ok().and_then(|g| g.map(|h| h.0));
    unsafe { CallNextHookEx(hook, code, wparam, lparam) }
}

fn clear_statics() {
    if let Ok(mut s) = SHARED.lock() {
        *s = None;
    }
    if let Ok(mut s) = STOP_FLAG.lock() {
        *s = None;
    }
    if let Ok(mut tid) = THREAD_ID.lock() {
        *tid = 0;
    }
}

fn unhook_all() {
    unsafe {
        if let Ok(mut kh) = KEYBOARD_HOOK.lock()
            && let Some(hook) = kh.take()
        {
            let _ = UnhookWindowsHookEx(hook.0);
        }
        if let Ok(mut mh) = MOUSE_HOOK.lock()
            && let Some(hook) = mh.take()
        {
            let _ = UnhookWindowsHookEx(hook.0);
        }
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
    {
        let mut tid = THREAD_ID
            .lock()
            .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
        *tid = unsafe { GetCurrentThreadId() };
    }

    let keyboard_hook = unsafe {
        SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_callback), None, 0)
            .map_err(|e| Error::HookStartFailed(format!("Failed to set keyboard hook: {e}")))?
    };
    {
        let mut kh = KEYBOARD_HOOK
            .lock()
            .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
        *kh = Some(SendableHHOOK(keyboard_hook));
    }

    // If only half the pair goes in, take the keyboard hook back out.
    let mouse_hook = match unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_callback), None, 0) }
    {
        Ok(hook) => hook,
        Err(e) => {
            unhook_all();
            clear_statics();
            return Err(Error::HookStartFailed(format!(
                "Failed to set mouse hook: {e}"
            )));
        }
    };
    {
        let mut mh = MOUSE_HOOK
            .lock()
            .map_err(|_| Error::ThreadError("mutex poisoned".into()))?;
        *mh = Some(SendableHHOOK(mouse_hook));
    }

    // Message loop. Skipped when a stop raced the spawn: a WM_QUIT posted
    // before this thread had a message queue would have been lost.
    if running.load(Ordering::SeqCst) {
        let mut msg = windows::Win32::UI::WindowsAndMessaging::MSG::default();
        unsafe {
            while GetMessageW(&mut msg, None, 0, 0).as_bool() {
                if let Ok(guard) = STOP_FLAG.lock()
                    && let Some(ref flag) = *guard
                    && !flag.load(Ordering::SeqCst)
                {
                    break;
                }
            }
        }
    }

    unhook_all();
    clear_statics();

    Ok(())
}

/// Stop the event listener.
pub fn stop_listener() {
    if let Ok(thread_id) = THREAD_ID.lock()
        && *thread_id != 0
    {
        unsafe {
            let _ = PostThreadMessageW(*thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
    }
}
