//! Celebration pulse — a timed visual trigger (confetti).
//!
//! DESIGN
//! ======
//! `trigger` raises the pulse and schedules a reset task after the window.
//! A retrigger aborts the pending reset and starts a fresh window, so
//! overlapping triggers extend the pulse instead of queueing. Every reset
//! task carries the generation it was scheduled under and only lowers the
//! pulse if no newer trigger happened meanwhile. `cancel` and `Drop` abort
//! the pending task so nothing fires after the session is torn down.
//!
//! Must be triggered from inside a tokio runtime.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_CELEBRATION_WINDOW: Duration = Duration::from_secs(5);

pub struct Celebration {
    window: Duration,
    active: Arc<watch::Sender<bool>>,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl Celebration {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { window, active: Arc::new(tx), generation: Arc::new(AtomicU64::new(0)), pending: None }
    }

    /// Raise the pulse and (re)start the reset window.
    pub fn trigger(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.active.send_replace(true);
        debug!(generation, window = ?self.window, "celebration triggered");

        let active = Arc::clone(&self.active);
        let current = Arc::clone(&self.generation);
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if current.load(Ordering::SeqCst) == generation {
                active.send_replace(false);
            }
        }));
    }

    /// Abort any pending reset and lower the pulse.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.active.send_replace(false);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        *self.active.borrow()
    }

    /// Watch the pulse, e.g. to drive a confetti overlay.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.active.subscribe()
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new(DEFAULT_CELEBRATION_WINDOW)
    }
}

impl Drop for Celebration {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "celebration_test.rs"]
mod tests;
