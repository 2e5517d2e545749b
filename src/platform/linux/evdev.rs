//! Input capture from /dev/input event devices.
//!
//! Works on both X11 and Wayland, but needs read access to the devices
//! (typically membership in the `input` group). evdev reports relative
//! pointer motion, so the cursor position is accumulated locally unless a
//! caller brings its own absolute source.

use crate::error::{Error, Result};
use crate::platform::linux::keycodes::{evdev_code_to_button, evdev_code_to_key};
use crate::state::{InputEvent, SharedState};
use evdev::{AbsoluteAxisType, Device, EventType as EvdevEventType, InputEventKind, RelativeAxisType};
use std::fs;
use std::os::unix::io::AsRawFd;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Poll timeout; doubles as the stop-flag check interval.
pub const POLL_INTERVAL_MS: i32 = 8;

/// Open every readable /dev/input event device that can produce key or
/// pointer events.
fn enumerate_devices() -> Result<Vec<Device>> {
    let mut devices = Vec::new();

    let dir = fs::read_dir("/dev/input").map_err(|e| {
        Error::PermissionDenied(format!(
            "Cannot access /dev/input: {e}. Make sure you're in the 'input' group."
        ))
    })?;

    for entry in dir.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name() else {
            continue;
        };
        if !name.to_string_lossy().starts_with("event") {
            continue;
        }
        match Device::open(&path) {
            Ok(device) => {
                let supported = device.supported_events();
                if supported.contains(EvdevEventType::KEY)
                    || supported.contains(EvdevEventType::RELATIVE)
                    || supported.contains(EvdevEventType::ABSOLUTE)
                {
                    devices.push(device);
                }
            }
            Err(e) => {
                log::debug!("Failed to open {}: {}", path.display(), e);
            }
        }
    }

    if devices.is_empty() {
        return Err(Error::PermissionDenied(
            "No input devices accessible. Make sure you're in the 'input' group: \
             sudo usermod -aG input $USER"
                .into(),
        ));
    }

    Ok(devices)
}

/// A set of open input devices pumped on a poll loop.
pub struct DeviceReader {
    devices: Vec<Device>,
    poll_fds: Vec<libc::pollfd>,
    pos: (f64, f64),
    emit_motion: bool,
}

impl DeviceReader {
    /// Open all available devices. With `emit_motion` false, relative and
    /// absolute axis events are swallowed so a caller with an absolute
    /// cursor source can write positions itself.
    pub fn open(emit_motion: bool) -> Result<Self> {
        let devices = enumerate_devices()?;
        let poll_fds = devices
            .iter()
            .map(|d| libc::pollfd {
                fd: d.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect();
        Ok(Self {
            devices,
            poll_fds,
            pos: (0.0, 0.0),
            emit_motion,
        })
    }

    /// One poll pass: wait up to `timeout_ms` for device data and apply
    /// every translated event to `shared`. A timeout is not an error.
    pub fn pump(&mut self, shared: &SharedState, timeout_ms: i32) -> Result<()> {
        let ret =
            unsafe { libc::poll(self.poll_fds.as_mut_ptr(), self.poll_fds.len() as _, timeout_ms) };

        if ret < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                return Ok(());
            }
            return Err(Error::Platform(format!("poll on /dev/input failed: {err}")));
        }
        if ret == 0 {
            return Ok(());
        }

        for (i, pfd) in self.poll_fds.iter().enumerate() {
            if pfd.revents & libc::POLLIN == 0 {
                continue;
            }
            let Ok(events) = self.devices[i].fetch_events() else {
                continue;
            };
            for ev in events {
                if let Some(event) = convert_event(&ev, &mut self.pos, self.emit_motion) {
                    shared.apply(event);
                }
            }
        }

        Ok(())
    }
}

/// Translate one evdev event. Key value 2 is auto-repeat and is dropped;
/// the state tables only ever see real transitions from this source.
fn convert_event(
    ev: &evdev::InputEvent,
    pos: &mut (f64, f64),
    emit_motion: bool,
) -> Option<InputEvent> {
    match ev.kind() {
        InputEventKind::Key(key) => {
            let code = key.code();
            let pressed = match ev.value() {
                1 => true,
                0 => false,
                _ => return None,
            };

            if let Some(button) = evdev_code_to_button(code) {
                if pressed {
                    Some(InputEvent::ButtonDown(button))
                } else {
                    Some(InputEvent::ButtonUp(button))
                }
            } else if let Some(key) = evdev_code_to_key(code) {
                if pressed {
                    Some(InputEvent::KeyDown(key))
                } else {
                    Some(InputEvent::KeyUp(key))
                }
            } else {
                None
            }
        }

        InputEventKind::RelAxis(axis) => {
            let value = ev.value();
            match axis {
                RelativeAxisType::REL_X => {
                    pos.0 += value as f64;
                }
                RelativeAxisType::REL_Y => {
                    pos.1 += value as f64;
                }
                RelativeAxisType::REL_WHEEL => {
                    return Some(InputEvent::Wheel { delta: value });
                }
                _ => return None,
            }
            emit_motion.then_some(InputEvent::MouseMove { x: pos.0, y: pos.1 })
        }

        InputEventKind::AbsAxis(axis) => {
            let value = ev.value() as f64;
            match axis {
                AbsoluteAxisType::ABS_X => pos.0 = value,
                AbsoluteAxisType::ABS_Y => pos.1 = value,
                _ => return None,
            }
            emit_motion.then_some(InputEvent::MouseMove { x: pos.0, y: pos.1 })
        }

        _ => None,
    }
}

/// Run the event listener (blocking).
pub fn run_listener(running: &Arc<AtomicBool>, shared: SharedState) -> Result<()> {
    let mut reader = DeviceReader::open(true)?;
    while running.load(Ordering::SeqCst) {
        reader.pump(&shared, POLL_INTERVAL_MS)?;
    }
    Ok(())
}

/// Stop the event listener. The poll timeout observes the running flag, so
/// there is nothing to signal here.
pub fn stop_listener() {}
