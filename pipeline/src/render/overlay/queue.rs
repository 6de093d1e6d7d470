//! Serialized UI queue for overlay window mutations.
//!
//! All window and view operations run on one owner in submission order.
//! Callers enqueue and return immediately; there is no completion signal.
//! Ops are never dropped: a lost exit or clear would strand a view that no
//! source key maps to anymore.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::window::OverlayWindow;
use crate::render::lock;

/// One window mutation.
pub type UiOp = Box<dyn FnOnce(&mut OverlayWindow) + Send>;

/// Executes [`UiOp`]s serially against the overlay window.
pub trait UiQueue: Send + Sync {
    fn submit(&self, op: UiOp);

    /// Run `op` after `delay`, behind anything already queued at that time.
    fn submit_after(&self, delay: Duration, op: UiOp);
}

/// Queue backed by a Tokio worker task that owns the window.
pub struct TokioUiQueue {
    tx: mpsc::UnboundedSender<UiOp>,
    handle: Handle,
}

impl TokioUiQueue {
    /// Spawn the worker. Must be called from within a Tokio runtime; the
    /// returned queue can then be used from any thread.
    pub fn start(window: OverlayWindow) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<UiOp>();
        let handle = Handle::current();
        handle.spawn(worker_loop(window, rx));
        tracing::info!("Overlay UI queue worker started");
        Self { tx, handle }
    }
}

impl UiQueue for TokioUiQueue {
    fn submit(&self, op: UiOp) {
        if self.tx.send(op).is_err() {
            tracing::warn!("Overlay UI queue closed, dropping op");
        }
    }

    fn submit_after(&self, delay: Duration, op: UiOp) {
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(op).is_err() {
                tracing::debug!("Overlay UI queue closed before delayed op");
            }
        });
    }
}

async fn worker_loop(mut window: OverlayWindow, mut rx: mpsc::UnboundedReceiver<UiOp>) {
    while let Some(op) = rx.recv().await {
        op(&mut window);
    }
    // Queue dropped: tear down whatever is still attached.
    window.clear();
    tracing::info!("Overlay UI queue worker stopped");
}

/// Queue that buffers ops until [`ManualUiQueue::drain`]; for deterministic
/// tests and hosts that pump their own UI loop.
pub struct ManualUiQueue {
    window: Mutex<OverlayWindow>,
    pending: Mutex<VecDeque<UiOp>>,
    delayed: Mutex<Vec<(Duration, u64, UiOp)>>,
    seq: Mutex<u64>,
}

impl ManualUiQueue {
    pub fn new(window: OverlayWindow) -> Self {
        Self {
            window: Mutex::new(window),
            pending: Mutex::new(VecDeque::new()),
            delayed: Mutex::new(Vec::new()),
            seq: Mutex::new(0),
        }
    }

    /// Run immediate ops, then delayed ones in delay order, until nothing is
    /// left (ops may enqueue more). Returns how many ran.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        loop {
            if let Some(op) = self.next_immediate() {
                op(&mut lock(&self.window));
                ran += 1;
                continue;
            }
            let next = {
                let mut delayed = lock(&self.delayed);
                let earliest = delayed
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, (delay, seq, _))| (*delay, *seq))
                    .map(|(i, _)| i);
                earliest.map(|i| delayed.remove(i))
            };
            match next {
                Some((_, _, op)) => {
                    op(&mut lock(&self.window));
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    /// Run only the immediate ops, leaving delayed ones queued.
    pub fn drain_immediate(&self) -> usize {
        let mut ran = 0;
        while let Some(op) = self.next_immediate() {
            op(&mut lock(&self.window));
            ran += 1;
        }
        ran
    }

    // Pops without holding the lock while the op runs; ops may submit.
    fn next_immediate(&self) -> Option<UiOp> {
        lock(&self.pending).pop_front()
    }

    pub fn pending_delayed(&self) -> usize {
        lock(&self.delayed).len()
    }

    /// Inspect the window state.
    pub fn with_window<R>(&self, f: impl FnOnce(&OverlayWindow) -> R) -> R {
        f(&lock(&self.window))
    }
}

impl UiQueue for ManualUiQueue {
    fn submit(&self, op: UiOp) {
        lock(&self.pending).push_back(op);
    }

    fn submit_after(&self, delay: Duration, op: UiOp) {
        let seq = {
            let mut seq = lock(&self.seq);
            *seq += 1;
            *seq
        };
        lock(&self.delayed).push((delay, seq, op));
    }
}
