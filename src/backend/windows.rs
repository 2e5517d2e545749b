//! Windows polling backend.
//!
//! Samples `GetAsyncKeyState` across the whole virtual-key range on an
//! 8 ms cadence and applies the set difference against the previous pass
//! as transitions. Several VKs collapse onto one canonical key (left and
//! right modifier variants), so the diff runs over canonical sets rather
//! than raw VKs. The cursor is reported relative to the monitor it is on.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use windows::Win32::Foundation::POINT;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromPoint,
};
use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

use crate::backend::{Backend, BackendKind};
use crate::error::Result;
use crate::keycode::{Key, MouseButton};
use crate::platform::windows::keycodes::{vk_to_button, vk_to_key};
use crate::state::{InputEvent, SharedState};

const POLL_INTERVAL: Duration = Duration::from_millis(8);

pub struct WindowsBackend {
    shared: SharedState,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl WindowsBackend {
    pub fn new(shared: SharedState) -> Self {
        Self {
            shared,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

/// Cursor position relative to the top-left corner of the monitor under it.
fn cursor_position() -> Option<(i32, i32)> {
    unsafe {
        let mut pt = POINT::default();
        GetCursorPos(&mut pt).ok()?;

        let monitor = MonitorFromPoint(pt, MONITOR_DEFAULTTONEAREST);
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if GetMonitorInfoW(monitor, &mut info).as_bool() {
            Some((pt.x - info.rcMonitor.left, pt.y - info.rcMonitor.top))
        } else {
            Some((pt.x, pt.y))
        }
    }
}

fn sample(keys: &mut HashSet<Key>, buttons: &mut HashSet<MouseButton>) {
    for vk in 1..256u32 {
        let down = unsafe { GetAsyncKeyState(vk as i32) } as u16 & 0x8000 != 0;
        if !down {
            continue;
        }
        if let Some(button) = vk_to_button(vk) {
            buttons.insert(button);
        } else if let Some(key) = vk_to_key(vk) {
            keys.insert(key);
        }
    }
}

fn worker_loop(running: &AtomicBool, shared: &SharedState) {
    let mut keys_down: HashSet<Key> = HashSet::new();
    let mut buttons_down: HashSet<MouseButton> = HashSet::new();

    while running.load(Ordering::SeqCst) {
        let mut keys_now = HashSet::new();
        let mut buttons_now = HashSet::new();
        sample(&mut keys_now, &mut buttons_now);

        for key in keys_now.difference(&keys_down) {
            shared.apply(InputEvent::KeyDown(*key));
        }
        for key in keys_down.difference(&keys_now) {
            shared.apply(InputEvent::KeyUp(*key));
        }
        for button in buttons_now.difference(&buttons_down) {
            shared.apply(InputEvent::ButtonDown(*button));
        }
        for button in buttons_down.difference(&buttons_now) {
            shared.apply(InputEvent::ButtonUp(*button));
        }
        keys_down = keys_now;
        buttons_down = buttons_now;

        if let Some((x, y)) = cursor_position() {
            shared.apply(InputEvent::MouseMove {
                x: x as f64,
                y: y as f64,
            });
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}

impl Backend for WindowsBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Windows
    }

    fn start(&mut self) -> Result<()> {
        if self.running.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let shared = self.shared.clone();
        let handle = std::thread::Builder::new()
            .name("pollhook-windows".into())
            .spawn(move || worker_loop(&running, &shared))
            .map_err(|err| crate::error::Error::ThreadError(err.to_string()))?;
        self.worker = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::warn!("windows backend worker panicked during shutdown");
            }
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for WindowsBackend {
    fn drop(&mut self) {
        self.stop();
    }
}
