//! Debounced autosave.
//!
//! Every [`AutosaveScheduler::notify_dirty`] call replaces the pending save
//! with a fresh timer, so a burst of edits produces one save after the burst
//! goes quiet. Each scheduled save carries a [`Ticket`]; cancelling flips
//! the ticket before the save begins, and a cancelled ticket never saves. A
//! save that has already begun is left to finish.
//!
//! The save itself is injected. It is expected to snapshot the document when
//! it starts running, so edits made after that point are not lost: they
//! schedule their own save.

use crate::error::BoardResult;
use crate::status::{StatusMessage, StatusSink};
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error};

pub type SaveFuture = Pin<Box<dyn Future<Output = BoardResult<()>> + Send + 'static>>;

/// Produces one save run each time it is called.
pub type SaveFn = Arc<dyn Fn() -> SaveFuture + Send + Sync>;

const PENDING: u8 = 0;
const RUNNING: u8 = 1;
const CANCELLED: u8 = 2;

/// Cancellation token for one scheduled save.
#[derive(Debug)]
struct Ticket {
    state: AtomicU8,
}

impl Ticket {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(PENDING),
        }
    }

    /// Claim the ticket for running. Fails if it was cancelled.
    fn begin(&self) -> bool {
        self.state
            .compare_exchange(PENDING, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Cancel unless the save already began.
    fn cancel(&self) -> bool {
        self.state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn is_pending(&self) -> bool {
        self.state.load(Ordering::Acquire) == PENDING
    }
}

struct Scheduled {
    ticket: Arc<Ticket>,
    task: JoinHandle<()>,
}

impl Scheduled {
    fn cancel(self) {
        if self.ticket.cancel() {
            self.task.abort();
        }
    }
}

pub struct AutosaveScheduler {
    runtime: Handle,
    save: SaveFn,
    status: Arc<dyn StatusSink>,
    enabled: AtomicBool,
    debounce: Duration,
    kick: Duration,
    current: Mutex<Option<Scheduled>>,
    /// Keeps two saves from writing at the same time
    save_gate: Arc<tokio::sync::Mutex<()>>,
}

impl AutosaveScheduler {
    /// New scheduler, disabled, spawning its timers on `runtime`.
    pub fn new(
        runtime: Handle,
        save: SaveFn,
        status: Arc<dyn StatusSink>,
        debounce: Duration,
        kick: Duration,
    ) -> Self {
        Self {
            runtime,
            save,
            status,
            enabled: AtomicBool::new(false),
            debounce,
            kick,
            current: Mutex::new(None),
            save_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Start enabled (or not) without scheduling anything.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.enabled.store(enabled, Ordering::Release);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Switch autosave on or off. On schedules a prompt save; off cancels
    /// whatever is pending.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        if enabled {
            self.notify_dirty_after(self.kick);
        } else {
            self.cancel();
        }
    }

    /// The document changed; save after the debounce delay.
    pub fn notify_dirty(&self) {
        self.notify_dirty_after(self.debounce);
    }

    /// Replace any pending save with one that fires after `delay`.
    pub fn notify_dirty_after(&self, delay: Duration) {
        if !self.is_enabled() {
            return;
        }

        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            previous.cancel();
        }

        let ticket = Arc::new(Ticket::new());
        let task = self.runtime.spawn(run_after(
            delay,
            ticket.clone(),
            self.save.clone(),
            self.status.clone(),
            self.save_gate.clone(),
        ));
        *current = Some(Scheduled { ticket, task });
    }

    /// Drop the pending save, if it has not started.
    pub fn cancel(&self) {
        if let Some(previous) = self.current.lock().take() {
            previous.cancel();
        }
    }

    /// Run the pending save now instead of waiting for its timer. A save
    /// already in flight is waited for. Does nothing when neither exists.
    pub async fn flush(&self) -> BoardResult<()> {
        let pending = self.current.lock().take();
        let claimed = match pending {
            Some(scheduled) if scheduled.ticket.begin() => {
                scheduled.task.abort();
                true
            }
            _ => false,
        };

        let _guard = self.save_gate.lock().await;
        if claimed {
            debug!("Flushing pending autosave");
            (self.save)().await?;
        }
        Ok(())
    }

    /// A save is scheduled and has not started yet.
    pub fn is_pending(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(|scheduled| scheduled.ticket.is_pending())
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_after(
    delay: Duration,
    ticket: Arc<Ticket>,
    save: SaveFn,
    status: Arc<dyn StatusSink>,
    gate: Arc<tokio::sync::Mutex<()>>,
) {
    tokio::time::sleep(delay).await;

    let _guard = gate.lock().await;
    if !ticket.begin() {
        debug!("Autosave superseded before it started");
        return;
    }

    match save().await {
        Ok(()) => debug!("Autosave complete"),
        Err(e) => {
            error!(error = %e, "Autosave failed");
            status.report(StatusMessage::error(format!("Autosave failed: {e}")));
        }
    }
}
