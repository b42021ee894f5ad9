//! Runs lookups off the UI thread.
//!
//! Each request gets its own short-lived thread. Finished lookups come back
//! through a channel carrying the caller's tag and the UI drains them once per frame.

use super::{LookupError, WordLookup};
use crate::models::LookupResult;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Duration;
use tracing::warn;

pub type LookupOutcome = Result<LookupResult, LookupError>;

pub struct LookupDispatcher<T> {
    client: Arc<dyn WordLookup>,
    tx: Sender<(T, LookupOutcome)>,
    rx: Receiver<(T, LookupOutcome)>,
    repaint: Option<egui::Context>,
}

impl<T: Clone + Send + 'static> LookupDispatcher<T> {
    pub fn new(client: Arc<dyn WordLookup>) -> Self {
        let (tx, rx) = channel();
        Self {
            client,
            tx,
            rx,
            repaint: None,
        }
    }

    /// Wakes the UI when a lookup finishes
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn dispatch(&self, tag: T, word: String) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let fallback = tag.clone();

        let spawned = thread::Builder::new()
            .name("dictionary-lookup".to_string())
            .spawn(move || {
                let outcome = client.lookup(&word);
                // The receiver only goes away when the app is shutting down
                let _ = tx.send((tag, outcome));
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });

        if let Err(e) = spawned {
            self.report_spawn_failure(fallback, e);
        }
    }

    /// Hands the caller an error outcome so it never waits on a lookup that did not start
    fn report_spawn_failure(&self, tag: T, error: io::Error) {
        warn!(error = %error, "could not start lookup thread");
        let _ = self.tx.send((tag, Err(LookupError::Spawn(error))));
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }

    /// Finished lookups, without blocking
    pub fn poll(&self) -> Vec<(T, LookupOutcome)> {
        self.rx.try_iter().collect()
    }

    /// Waits up to `timeout` for the next finished lookup
    pub fn wait(&self, timeout: Duration) -> Option<(T, LookupOutcome)> {
        self.rx.recv_timeout(timeout).ok()
    }
}
