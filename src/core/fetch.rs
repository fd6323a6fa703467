//! Generation-counted async fetches.
//!
//! A [`FetchSlot`] belongs to one component instance. Starting a fetch bumps
//! the slot's generation and spawns the future on the tokio runtime; the
//! result comes back tagged with the generation it was started under. Results
//! whose generation no longer matches (the component restarted the fetch,
//! changed its subject, or was torn down) are dropped on the floor. The
//! request itself is never aborted.

use std::future::Future;

use tokio::sync::mpsc;

pub struct FetchSlot<T> {
    generation: u64,
    tx: mpsc::UnboundedSender<(u64, T)>,
    rx: mpsc::UnboundedReceiver<(u64, T)>,
}

impl<T: Send + 'static> FetchSlot<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            generation: 0,
            tx,
            rx,
        }
    }

    /// Current generation. Zero until the first fetch starts.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate whatever is in flight and spawn `fut` as the current fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, fut: F) -> u64
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let output = fut.await;
            // Receiver gone means the owner was dropped; nothing to deliver to.
            let _ = tx.send((generation, output));
        });

        generation
    }

    /// Invalidate the in-flight fetch without starting another.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Non-blocking: the current generation's result, if it has arrived.
    pub fn try_take(&mut self) -> Option<T> {
        while let Ok((generation, output)) = self.rx.try_recv() {
            if let Some(output) = self.accept(generation, output) {
                return Some(output);
            }
        }
        None
    }

    /// Wait for the current generation's result, skipping stale ones.
    pub async fn next(&mut self) -> Option<T> {
        while let Some((generation, output)) = self.rx.recv().await {
            if let Some(output) = self.accept(generation, output) {
                return Some(output);
            }
        }
        None
    }

    fn accept(&self, generation: u64, output: T) -> Option<T> {
        if generation == self.generation {
            Some(output)
        } else {
            log::debug!(
                "Discarding stale fetch result (generation {generation}, current {})",
                self.generation
            );
            None
        }
    }
}

impl<T: Send + 'static> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
