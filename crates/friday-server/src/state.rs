//! Server state management.

use std::sync::Arc;

use tokio::sync::RwLock;

use friday_core::assistant::Assistant;
use friday_core::traits::IntentDetector;

/// Shared application state.
///
/// One assistant serves every request: it owns the single chat session.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<RwLock<Assistant>>,
    pub detector: Arc<dyn IntentDetector>,
}

impl AppState {
    pub fn new(assistant: Assistant, detector: Arc<dyn IntentDetector>) -> Self {
        Self {
            assistant: Arc::new(RwLock::new(assistant)),
            detector,
        }
    }

    /// Run `f` against the assistant under the read lock.
    pub async fn with_assistant<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Assistant) -> T,
    {
        let guard = self.assistant.read().await;
        f(&guard)
    }

    /// Run `f` against the assistant under the write lock.
    pub async fn with_assistant_mut<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Assistant) -> T,
    {
        let mut guard = self.assistant.write().await;
        f(&mut guard)
    }
}
