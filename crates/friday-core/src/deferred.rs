//! Delayed, cancellable replies.
//!
//! At most one reply is pending at a time: scheduling a new one cancels the
//! previous one, so a slow answer can never land after a newer one. Every
//! scheduled reply carries a generation; only the newest, uncancelled
//! generation is current.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::ReplyDelayConfig;

/// A reply that resolves after its delay, or to `None` when superseded.
pub struct DeferredReply<T> {
    handle: JoinHandle<Option<T>>,
    generation: u64,
    delay: Duration,
}

impl<T> DeferredReply<T> {
    /// Wait for the reply. `None` when it was cancelled.
    pub async fn wait(self) -> Option<T> {
        match self.handle.await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Deferred reply task failed");
                None
            }
        }
    }

    /// Generation assigned when the reply was scheduled.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The artificial delay chosen for this reply.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Scheduler for deferred replies.
pub struct DeferredReplies {
    delay: ReplyDelayConfig,
    current: Mutex<Pending>,
}

#[derive(Default)]
struct Pending {
    generation: u64,
    token: Option<CancellationToken>,
}

impl DeferredReplies {
    pub fn new(delay: ReplyDelayConfig) -> Self {
        Self {
            delay,
            current: Mutex::new(Pending::default()),
        }
    }

    /// Schedule `reply` to run after the configured delay, cancelling any
    /// reply still pending. Must be called inside a tokio runtime.
    pub fn schedule<F, T>(&self, reply: F) -> DeferredReply<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let token = CancellationToken::new();
        let generation = {
            let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = current.token.replace(token.clone()) {
                if !previous.is_cancelled() {
                    debug!("Superseding pending reply");
                    previous.cancel();
                }
            }
            current.generation += 1;
            current.generation
        };

        let delay = self.sample_delay();
        let child = token;
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => None,
                value = async {
                    tokio::time::sleep(delay).await;
                    reply.await
                } => Some(value),
            }
        });

        DeferredReply {
            handle,
            generation,
            delay,
        }
    }

    /// Cancel the pending reply, if any.
    pub fn cancel_pending(&self) {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = current.token.as_ref() {
            token.cancel();
        }
    }

    /// Whether `generation` is the newest reply and was never cancelled.
    /// A reply that already resolved can still be superseded afterwards.
    pub fn is_current(&self, generation: u64) -> bool {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.generation == generation
            && current.token.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    fn sample_delay(&self) -> Duration {
        let ReplyDelayConfig { min_ms, max_ms } = self.delay;
        let ms = if max_ms > min_ms {
            rand::thread_rng().gen_range(min_ms..max_ms)
        } else {
            min_ms
        };
        Duration::from_millis(ms)
    }
}

impl Default for DeferredReplies {
    fn default() -> Self {
        Self::new(ReplyDelayConfig::default())
    }
}
