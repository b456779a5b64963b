//! One-shot background loads with stale-result suppression.
//!
//! Each [`BookLoader::start`] spawns a fresh tokio task that runs one search
//! and sends its result, tagged with a generation number, into the loader's
//! channel. Starting a new load aborts the previous task and bumps the
//! generation. [`BookLoader::next_delivery`] is the single consumer of that
//! channel and drops anything not tagged with the latest generation, including
//! results that were already queued when the newer load started.

use std::sync::Arc;

use bookfinder_core::{BookRecord, QuerySettings};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::BooksClient;
use crate::error::LoadError;

/// Result of one fetch cycle, tagged with the generation that requested it.
#[derive(Debug)]
pub struct Delivery {
    pub generation: u64,
    pub result: Result<Option<Vec<BookRecord>>, LoadError>,
}

/// Sends exactly one [`Delivery`] per load task.
///
/// If the task is aborted or panics before calling [`DeliveryGuard::deliver`],
/// dropping the guard sends [`LoadError::Aborted`] instead, so the consumer
/// never waits on a task that will not report.
struct DeliveryGuard {
    tx: Option<mpsc::UnboundedSender<Delivery>>,
    generation: u64,
}

impl DeliveryGuard {
    fn new(tx: mpsc::UnboundedSender<Delivery>, generation: u64) -> Self {
        Self {
            tx: Some(tx),
            generation,
        }
    }

    fn deliver(mut self, result: Result<Option<Vec<BookRecord>>, LoadError>) {
        self.send(result);
    }

    fn send(&mut self, result: Result<Option<Vec<BookRecord>>, LoadError>) {
        if let Some(tx) = self.tx.take() {
            // The receiver lives in the loader; if it is gone nobody is waiting.
            let _ = tx.send(Delivery {
                generation: self.generation,
                result,
            });
        }
    }
}

impl Drop for DeliveryGuard {
    fn drop(&mut self) {
        if self.tx.is_some() {
            tracing::debug!(generation = self.generation, "book load ended without a result");
            self.send(Err(LoadError::Aborted));
        }
    }
}

/// Runs searches off the caller's task and hands back only the latest result.
pub struct BookLoader {
    client: Arc<BooksClient>,
    tx: mpsc::UnboundedSender<Delivery>,
    rx: mpsc::UnboundedReceiver<Delivery>,
    latest: u64,
    /// Generation whose delivery has not been returned yet.
    pending: Option<u64>,
    in_flight: Option<JoinHandle<()>>,
}

impl BookLoader {
    #[must_use]
    pub fn new(client: Arc<BooksClient>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            tx,
            rx,
            latest: 0,
            pending: None,
            in_flight: None,
        }
    }

    /// Starts a load for `settings`, superseding any load still in flight.
    ///
    /// Returns the generation assigned to this load. Must be called from
    /// within a tokio runtime.
    pub fn start(&mut self, settings: QuerySettings) -> u64 {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!(generation = self.latest, "superseding in-flight book load");
            }
            previous.abort();
        }

        self.latest += 1;
        let generation = self.latest;
        self.pending = Some(generation);

        let client = Arc::clone(&self.client);
        let guard = DeliveryGuard::new(self.tx.clone(), generation);
        self.in_flight = Some(tokio::spawn(async move {
            let result = client.search(&settings).await;
            guard.deliver(result);
        }));

        generation
    }

    /// Waits for the result of the latest load.
    ///
    /// Deliveries from superseded generations are discarded. Returns `None`
    /// when no load is pending, i.e. nothing was started, the latest result
    /// was already returned, or the load was cancelled.
    pub async fn next_delivery(&mut self) -> Option<Delivery> {
        let pending = self.pending?;
        loop {
            let delivery = self.rx.recv().await?;
            if delivery.generation == pending {
                self.pending = None;
                self.in_flight = None;
                return Some(delivery);
            }
            tracing::debug!(
                generation = delivery.generation,
                latest = pending,
                "discarding stale book results"
            );
        }
    }

    /// Generation of the most recently started load, `0` if none.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.latest
    }

    /// Returns `true` while the latest load's result has not been returned
    /// by [`BookLoader::next_delivery`].
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Aborts the in-flight load, if any. Its result, should it race the
    /// abort, is never returned.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.pending = None;
    }
}

impl Drop for BookLoader {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
