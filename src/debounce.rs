//! Trailing-edge debouncing for persistence writes.
//!
//! Rapid mutations each schedule a fresh snapshot; the worker only acts once
//! the channel has been quiet for the full delay, and then acts on the
//! latest snapshot only. A new schedule restarts the window.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

enum Msg<T> {
    Schedule(T),
    Flush(Sender<()>),
}

/// Coalesces repeated triggers into one delayed action on a worker thread.
///
/// Dropping the debouncer flushes any pending snapshot before the worker
/// exits, so the last debounce window is never silently lost.
pub struct Debouncer<T: Send + 'static> {
    tx: Option<Sender<Msg<T>>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, mut action: impl FnMut(T) + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || run_worker(rx, delay, &mut action));
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Replace the pending snapshot and restart the delay window.
    pub fn schedule(&self, snapshot: T) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Msg::Schedule(snapshot));
        }
    }

    /// Run the pending action now, if any, and wait for it to finish.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else { return };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Msg::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        // Closing the channel tells the worker to flush pending and exit.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker<T>(rx: Receiver<Msg<T>>, delay: Duration, action: &mut impl FnMut(T)) {
    let mut pending: Option<T> = None;
    loop {
        let msg = if pending.is_some() {
            match rx.recv_timeout(delay) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(snapshot) = pending.take() {
                        action(snapshot);
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match rx.recv() {
                Ok(msg) => msg,
                Err(_) => break,
            }
        };

        match msg {
            Msg::Schedule(snapshot) => pending = Some(snapshot),
            Msg::Flush(ack) => {
                if let Some(snapshot) = pending.take() {
                    action(snapshot);
                }
                let _ = ack.send(());
            }
        }
    }
    // Channel closed: final flush.
    if let Some(snapshot) = pending.take() {
        action(snapshot);
    }
}
