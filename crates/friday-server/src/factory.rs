//! Build the application state from configuration.

use friday_core::assistant::Assistant;
use friday_core::config::{FridayConfig, RelayProvider};
use friday_core::error::FridayResult;
use friday_relay::DetectorFactory;
use tracing::info;

use crate::state::AppState;

/// Create the assistant and relay detector described by `config`.
///
/// The chat pipeline answers fallback input through the detector only when
/// a remote provider is configured; the local provider duplicates the
/// assistant's own canned table.
pub fn create_state(config: &FridayConfig) -> FridayResult<AppState> {
    let detector = DetectorFactory::create(&config.relay)?;
    let chat_detector = match config.relay.provider {
        RelayProvider::Local => None,
        _ => Some(detector.clone()),
    };

    let assistant = Assistant::from_config(config, chat_detector)?;
    info!(
        backend = ?config.store.backend,
        relay = detector.provider_name(),
        messages = assistant.messages().len(),
        "Assistant ready"
    );
    Ok(AppState::new(assistant, detector))
}
