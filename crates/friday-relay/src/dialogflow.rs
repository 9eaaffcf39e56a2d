//! Dialogflow ES intent detector over the REST `detectIntent` endpoint.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use friday_core::config::RelayConfig;
use friday_core::error::{ErrorCode, FridayError, FridayResult};
use friday_core::traits::{DetectedIntent, IntentDetector};

/// Dialogflow intent detector.
///
/// Every call opens a fresh conversation session, so no context carries over
/// between utterances.
pub struct DialogflowDetector {
    client: Client,
    base_url: Url,
    project_id: String,
    language_code: String,
    access_token: SecretString,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest<'a> {
    query_input: QueryInput<'a>,
}

#[derive(Debug, Serialize)]
struct QueryInput<'a> {
    text: TextInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextInput<'a> {
    text: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    query_result: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    #[serde(default)]
    fulfillment_text: String,
    intent: Option<MatchedIntent>,
    intent_detection_confidence: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedIntent {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

impl DialogflowDetector {
    /// Create a new Dialogflow detector.
    pub fn new(config: &RelayConfig) -> FridayResult<Self> {
        let access_token = config.access_token.clone().ok_or_else(|| {
            FridayError::Authentication {
                message: "Dialogflow access token not found. Set DIALOGFLOW_ACCESS_TOKEN environment variable or provide access_token in config.".to_string(),
                code: ErrorCode::AuthMissingCredentials,
                source: None,
            }
        })?;

        if config.project_id.trim().is_empty() {
            return Err(FridayError::Configuration(
                "Dialogflow project id is empty".to_string(),
            ));
        }

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FridayError::Configuration(format!("Invalid Dialogflow URL: {}", e)))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                FridayError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            project_id: config.project_id.clone(),
            language_code: config.language_code.clone(),
            access_token,
        })
    }

    fn endpoint(&self, session: &Uuid) -> String {
        format!(
            "{}/v2/projects/{}/agent/sessions/{}:detectIntent",
            self.base_url.as_str().trim_end_matches('/'),
            self.project_id,
            session
        )
    }
}

#[async_trait]
impl IntentDetector for DialogflowDetector {
    #[instrument(skip(self, text), fields(project = %self.project_id))]
    async fn detect(&self, text: &str) -> FridayResult<DetectedIntent> {
        let session = Uuid::new_v4();
        let request = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput {
                    text,
                    language_code: &self.language_code,
                },
            },
        };

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint(&session))
            .bearer_auth(self.access_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FridayError::relay(format!("Failed to read response body: {}", e)))?;

        debug!(
            %session,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "detectIntent returned"
        );

        if !status.is_success() {
            let message = serde_json::from_str::<GoogleError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(FridayError::from_http_status(status.as_u16(), &message));
        }

        parse_response(&body)
    }

    fn provider_name(&self) -> &str {
        "dialogflow"
    }
}

fn request_error(err: reqwest::Error) -> FridayError {
    let code = if err.is_timeout() {
        ErrorCode::NetTimeout
    } else {
        ErrorCode::NetConnectionFailed
    };
    FridayError::Network {
        message: format!("Dialogflow request failed: {}", err),
        code,
        source: Some(Box::new(err)),
    }
}

fn parse_response(body: &str) -> FridayResult<DetectedIntent> {
    let response: DetectIntentResponse = serde_json::from_str(body)
        .map_err(|e| FridayError::relay_response(format!("Failed to parse response: {}", e)))?;

    let result = response
        .query_result
        .ok_or_else(|| FridayError::relay_response("Response has no queryResult"))?;

    Ok(DetectedIntent {
        fulfillment_text: result.fulfillment_text,
        intent_name: result.intent.map(|i| i.display_name),
        confidence: result.intent_detection_confidence,
    })
}
