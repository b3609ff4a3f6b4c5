//! Lifetime scope for a mounted view.
//!
//! Every view owns a `ViewScope`. Work started through [`ViewScope::run`] is
//! dropped as soon as the scope closes, so a response that arrives after the
//! view is gone never reaches its state.

use std::future::Future;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels all outstanding work in this scope. Idempotent.
    pub fn close(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!("closing view scope");
        }
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs `future` until it completes or the scope closes.
    ///
    /// Returns `None` when the scope closed first; the future is dropped
    /// without being polled again.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => None,
            output = future => Some(output),
        }
    }
}
