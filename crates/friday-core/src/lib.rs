//! friday-core - Core library for FRIDAY LITE.
//!
//! This crate provides the intent router, the per-intent handlers, the
//! session model and the key-value persistence used by the FRIDAY LITE
//! chat assistant.
//!
//! # Example
//!
//! ```ignore
//! use friday_core::{Assistant, FridayConfig};
//!
//! let config = FridayConfig::from_env();
//! let mut assistant = Assistant::from_config(&config, None)?;
//!
//! let reply = assistant.respond("Remind me to call mom by tomorrow").await?;
//! ```

pub mod assistant;
pub mod clock;
pub mod config;
pub mod deferred;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod reminders;
pub mod session;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use assistant::{
    Assistant, FallbackOutcome, FallbackReply, PendingFallback, Submission, RELAY_APOLOGY,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    FridayConfig, RelayConfig, RelayProvider, ReminderConfig, ReplyDelayConfig, StoreBackend,
    StoreConfig,
};
pub use deferred::{DeferredReplies, DeferredReply};
pub use error::{ErrorCode, FridayError, FridayResult};
pub use intent::{classify, Intent};
pub use reminders::ReminderScheduler;
pub use session::Session;
pub use traits::{DetectedIntent, IntentDetector, KeyValueStore, StoreKey, QUIZ_ANSWERS_INTENT};
pub use types::{
    Message, NewTask, Note, Notebook, QuizQuestion, Sender, Task, TaskList, Theme,
};
