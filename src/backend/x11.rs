//! Linux polling backend.
//!
//! Pumps /dev/input on an 8 ms cadence and, when the `x11` feature is
//! enabled and an X server is reachable, overwrites the accumulated cursor
//! position with XQueryPointer's absolute answer each pass. Without X the
//! cursor falls back to relative accumulation from the devices themselves.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::backend::{Backend, BackendKind};
use crate::error::Result;
use crate::platform::linux::evdev::{DeviceReader, POLL_INTERVAL_MS};
use crate::state::SharedState;

#[cfg(feature = "x11")]
use crate::platform::linux::cursor::PointerProbe;
#[cfg(feature = "x11")]
use crate::state::InputEvent;

pub struct X11Backend {
    shared: SharedState,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl X11Backend {
    pub fn new(shared: SharedState) -> Self {
        Self {
            shared,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

fn worker_loop(running: &AtomicBool, shared: &SharedState) {
    #[cfg(feature = "x11")]
    let probe = PointerProbe::open();
    #[cfg(feature = "x11")]
    let emit_motion = probe.is_none();
    #[cfg(not(feature = "x11"))]
    let emit_motion = true;

    let mut reader = match DeviceReader::open(emit_motion) {
        Ok(reader) => reader,
        Err(err) => {
            log::warn!("x11 backend could not open input devices: {err}");
            return;
        }
    };

    while running.load(Ordering::SeqCst) {
        if let Err(err) = reader.pump(shared, POLL_INTERVAL_MS) {
            log::warn!("x11 backend poll loop failed: {err}");
            return;
        }

        #[cfg(feature = "x11")]
        if let Some(ref probe) = probe
            && let Some((x, y)) = probe.position()
        {
            shared.apply(InputEvent::MouseMove {
                x: x as f64,
                y: y as f64,
            });
        }
    }
}

impl Backend for X11Backend {
    fn kind(&self) -> BackendKind {
        BackendKind::X11
    }

    fn start(&mut self) -> Result<()> {
        if self.running.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let shared = self.shared.clone();
        let handle = std::thread::Builder::new()
            .name("pollhook-x11".into())
            .spawn(move || worker_loop(&running, &shared))
            .map_err(|err| crate::error::Error::ThreadError(err.to_string()))?;
        self.worker = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        // The poll timeout observes the flag; joining is enough.
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::warn!("x11 backend worker panicked during shutdown");
            }
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        self.stop();
    }
}
