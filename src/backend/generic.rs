//! Push-model backend over the platform's native event hook.
//!
//! The worker thread installs the OS hook and blocks in its event loop;
//! translated events are applied to the shared tables from the callback.
//! Stopping signals the loop through [`platform::stop_listener`] and joins
//! the worker before returning.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::backend::{Backend, BackendKind};
use crate::error::Result;
use crate::platform;
use crate::state::SharedState;

pub struct GenericBackend {
    shared: SharedState,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl GenericBackend {
    pub fn new(shared: SharedState) -> Self {
        Self {
            shared,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

impl Backend for GenericBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Generic
    }

    fn start(&mut self) -> Result<()> {
        if self.running.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let shared = self.shared.clone();
        let handle = std::thread::Builder::new()
            .name("pollhook-generic".into())
            .spawn(move || {
                // A failed hook install leaves the tables empty; the backend
                // stays up and queries report nothing pressed.
                if let Err(err) = platform::run_listener(&running, shared) {
                    log::warn!("generic hook listener failed: {err}");
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
        platform::stop_listener();
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::warn!("generic hook worker panicked during shutdown");
            }
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for GenericBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameClock;

    // A stop issued right after start must join the worker even when the
    // listener has not finished registering its stop plumbing yet.
    #[test]
    fn test_stop_immediately_after_start_joins() {
        let shared = SharedState::new(FrameClock::new());
        let mut backend = GenericBackend::new(shared);
        if backend.start().is_ok() {
            backend.stop();
        }
        assert!(!backend.is_running());
        assert!(backend.worker.is_none());
    }
}
