//! Once-only loader for process-wide external resources.
//!
//! ARCHITECTURE
//! ============
//! Each third-party resource (chat widget script, affiliate capture) owns a
//! [`LoaderCell`] tracking `Unloaded -> Loading -> Loaded`. The first caller
//! to [`LoaderCell::begin`] while unloaded wins the right to perform the
//! load; every caller that races in while the attempt is in flight receives
//! a channel settled with the same outcome, so N concurrent `load_once`
//! calls produce exactly one underlying attempt. Failure returns the cell to
//! `Unloaded`, permitting a retry; a cell never leaves `Loaded`.
//!
//! The transition runs inside a single mutex guard, which keeps
//! `Unloaded -> Loading` race-free even off the browser's single thread.

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;

use std::sync::{Arc, Mutex};

use futures::channel::oneshot;

/// Lifecycle phase of an external resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Unloaded,
    Loading,
    Loaded,
}

type Outcome = Result<(), String>;

#[derive(Default)]
struct Inner {
    phase: LoadPhase,
    waiters: Vec<oneshot::Sender<Outcome>>,
}

/// Shared per-resource load state. Clone is a handle to the same cell.
#[derive(Clone, Default)]
pub struct LoaderCell {
    inner: Arc<Mutex<Inner>>,
}

/// What a caller should do after asking to load.
pub enum Begin {
    /// Already loaded; nothing to wait for.
    Ready,
    /// An attempt is in flight; await this receiver for its outcome.
    Wait(oneshot::Receiver<Outcome>),
    /// This caller owns the load attempt and must call [`LoaderCell::settle`].
    Start,
}

impl LoaderCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .phase
    }

    /// Claim or join the load attempt. At most one caller gets [`Begin::Start`]
    /// per attempt; the rest wait on the same outcome.
    #[must_use]
    pub fn begin(&self) -> Begin {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match inner.phase {
            LoadPhase::Loaded => Begin::Ready,
            LoadPhase::Loading => {
                let (tx, rx) = oneshot::channel();
                inner.waiters.push(tx);
                Begin::Wait(rx)
            }
            LoadPhase::Unloaded => {
                inner.phase = LoadPhase::Loading;
                Begin::Start
            }
        }
    }

    /// Record the attempt's outcome and release every waiter with it.
    ///
    /// Success pins the cell at `Loaded`; failure returns it to `Unloaded` so
    /// a later call may retry.
    pub fn settle(&self, outcome: &Outcome) {
        let waiters = {
            let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            inner.phase = if outcome.is_ok() { LoadPhase::Loaded } else { LoadPhase::Unloaded };
            std::mem::take(&mut inner.waiters)
        };
        for waiter in waiters {
            // A dropped receiver just means that caller went away.
            let _ = waiter.send(outcome.clone());
        }
    }
}

/// Load a resource at most once, sharing the in-flight outcome with every
/// concurrent caller.
///
/// `start` runs only for the caller that owns the attempt.
///
/// # Errors
///
/// Returns the attempt's error string; the cell is left retryable.
pub async fn load_once<F, Fut>(cell: &LoaderCell, start: F) -> Outcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Outcome>,
{
    match cell.begin() {
        Begin::Ready => Ok(()),
        Begin::Wait(receiver) => receiver
            .await
            .unwrap_or_else(|_| Err("load attempt dropped before settling".to_owned())),
        Begin::Start => {
            let outcome = start().await;
            cell.settle(&outcome);
            outcome
        }
    }
}
