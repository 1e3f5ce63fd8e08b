//! Stale-result suppression for screens that navigate away mid-call.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation token. Cancelling does not abort the
/// underlying network call; it only suppresses the result, so a screen
/// that was torn down never commits state from a call that settled late.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run `fut` to completion and return its result only if the token is
    /// still live when it settles; a cancelled token swallows the result
    /// silently.
    pub async fn guard<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let value = fut.await;
        if self.is_cancelled() {
            None
        } else {
            Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn live_token_passes_the_result_through() {
        let token = CancelToken::new();
        assert_eq!(token.guard(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn cancelled_token_suppresses_the_result() {
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(token.guard(async { 7 }).await, None);
    }

    #[tokio::test]
    async fn cancellation_mid_flight_suppresses_a_settled_call() {
        let token = CancelToken::new();
        let inner = token.clone();
        let result = token
            .guard(async move {
                // the screen goes away while the call is in flight
                inner.cancel();
                "body"
            })
            .await;
        assert_eq!(result, None);
    }
}
