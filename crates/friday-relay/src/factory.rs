//! Factory for creating intent detectors.

use std::sync::Arc;

use tracing::info;

use friday_core::config::{RelayConfig, RelayProvider};
use friday_core::error::FridayResult;
use friday_core::traits::IntentDetector;

use crate::dialogflow::DialogflowDetector;
use crate::local::LocalDetector;

/// Factory for creating intent detectors.
pub struct DetectorFactory;

impl DetectorFactory {
    /// Create a detector from the given configuration.
    pub fn create(config: &RelayConfig) -> FridayResult<Arc<dyn IntentDetector>> {
        let detector: Arc<dyn IntentDetector> = match config.provider {
            RelayProvider::Local => Arc::new(LocalDetector::new()),
            RelayProvider::Dialogflow => Arc::new(DialogflowDetector::new(config)?),
        };
        info!(provider = detector.provider_name(), "Intent detector ready");
        Ok(detector)
    }

    /// Create the offline detector.
    pub fn local() -> Arc<dyn IntentDetector> {
        Arc::new(LocalDetector::new())
    }

    /// Create a Dialogflow detector for `project_id` with `access_token`.
    pub fn dialogflow(
        project_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> FridayResult<Arc<dyn IntentDetector>> {
        let config = RelayConfig {
            provider: RelayProvider::Dialogflow,
            project_id: project_id.into(),
            access_token: Some(secrecy::SecretString::new(access_token.into())),
            ..Default::default()
        };
        Self::create(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use friday_core::error::ErrorCode;

    #[test]
    fn test_create_local() {
        let detector = DetectorFactory::create(&RelayConfig::default()).unwrap();
        assert_eq!(detector.provider_name(), "local");
    }

    #[test]
    fn test_create_dialogflow() {
        let detector = DetectorFactory::dialogflow("small-talk-ufll", "token").unwrap();
        assert_eq!(detector.provider_name(), "dialogflow");
    }

    #[test]
    fn test_dialogflow_requires_token() {
        let config = RelayConfig {
            provider: RelayProvider::Dialogflow,
            ..Default::default()
        };
        let err = DetectorFactory::create(&config).err().unwrap();
        assert_eq!(err.code(), ErrorCode::AuthMissingCredentials);
    }
}
