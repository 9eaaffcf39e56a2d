//! friday-relay - Intent relay providers for FRIDAY LITE.
//!
//! Input the local router cannot place is handed to an [`IntentDetector`].
//!
//! # Supported Providers
//!
//! - **Local** - the built-in small-talk table, no network
//! - **Dialogflow** - Dialogflow ES `detectIntent` over REST
//!
//! # Example
//!
//! ```ignore
//! use friday_relay::DetectorFactory;
//!
//! let detector = DetectorFactory::dialogflow("small-talk-ufll", token)?;
//! let detected = detector.detect("hello").await?;
//! println!("{}", detected.fulfillment_text);
//! ```

mod dialogflow;
mod factory;
mod local;

pub use dialogflow::DialogflowDetector;
pub use factory::DetectorFactory;
pub use local::{LocalDetector, SMALLTALK_INTENT};

// Re-export core types for convenience
pub use friday_core::config::{RelayConfig, RelayProvider};
pub use friday_core::traits::{DetectedIntent, IntentDetector, QUIZ_ANSWERS_INTENT};
