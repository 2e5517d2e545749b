//! macOS dedicated backend.
//!
//! Same event tap as the generic hook, but pumps the run loop in 8 ms
//! slices and re-queries the cursor position between slices. Stopping only
//! needs the flag cleared; the worker notices within one slice.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::backend::{Backend, BackendKind};
use crate::error::Result;
use crate::platform;
use crate::state::SharedState;

pub struct MacosBackend {
    shared: SharedState,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl MacosBackend {
    pub fn new(shared: SharedState) -> Self {
        Self {
            shared,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

impl Backend for MacosBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Macos
    }

    fn start(&mut self) -> Result<()> {
        if self.running.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let shared = self.shared.clone();
        let handle = std::thread::Builder::new()
            .name("pollhook-macos".into())
            .spawn(move || {
                if let Err(err) = platform::run_listener_sliced(&running, shared) {
                    log::warn!("macos backend listener failed: {err}");
                }
            })
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
                log::warn!("macos backend worker panicked during shutdown");
            }
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for MacosBackend {
    fn drop(&mut self) {
        self.stop();
    }
}
