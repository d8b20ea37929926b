//! HTTP client for the prediction service (`POST /predict`, `GET /health`).
//!
//! A single attempt per call. Any failure is terminal for the submission.

use std::time::Duration;

use gridsense_advisor::{EnergyPrediction, UserInput};
use gridsense_core::{PredictionError, ReqwestErrorExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictionError::Network(e.into_network_error()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit the household's answers and return the predicted bill.
    #[instrument(skip(self, input), level = "info", fields(climate = %input.climate))]
    pub async fn predict(&self, input: &UserInput) -> Result<EnergyPrediction, PredictionError> {
        let url = format!("{}/predict", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(|e| PredictionError::Network(e.into_network_error()))?;

        let prediction: EnergyPrediction = self.handle_response(response).await?;
        tracing::info!(
            bill = prediction.predicted_bill_usd,
            total_kwh = prediction.total_kwh,
            "Prediction received"
        );
        Ok(prediction)
    }

    /// True when the service answers `{"status": "ok"}`.
    #[instrument(skip(self), level = "debug")]
    pub async fn health(&self) -> Result<bool, PredictionError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PredictionError::Network(e.into_network_error()))?;

        let body: HealthBody = self.handle_response(response).await?;
        Ok(body.status.eq_ignore_ascii_case("ok"))
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, PredictionError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| PredictionError::InvalidResponse(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);
        tracing::warn!(status = status.as_u16(), %message, "Prediction service error");

        if status.as_u16() == 400 || status.as_u16() == 422 {
            Err(PredictionError::InvalidInput(message))
        } else {
            Err(PredictionError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}
