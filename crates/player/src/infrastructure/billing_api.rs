//! HTTP client for the billing backend.

use std::time::Duration;

use async_trait::async_trait;
use notiflow_shared::{CheckoutRequest, CheckoutResponse, DataEnvelope};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::application::billing::PORTAL_PATH;
use crate::ports::{BillingApiPort, BillingError};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where the billing backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingApiConfig {
    pub base_url: Url,
}

impl BillingApiConfig {
    pub fn new(base_url: &str) -> Result<Self, BillingError> {
        let base_url =
            Url::parse(base_url).map_err(|e| BillingError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

/// Body of a non-success response. Only the message is kept.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
}

pub struct ReqwestBillingApi {
    client: Client,
    config: BillingApiConfig,
}

impl ReqwestBillingApi {
    pub fn new(config: BillingApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T, BillingError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let payload: ErrorPayload = serde_json::from_str(&text).unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "Billing backend returned an error");
            return Err(BillingError::Http {
                status: status.as_u16(),
                message: payload.message,
            });
        }

        let envelope: DataEnvelope<T> = response
            .json()
            .await
            .map_err(|e| BillingError::InvalidResponse(e.to_string()))?;
        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl BillingApiPort for ReqwestBillingApi {
    async fn checkout(
        &self,
        path: &str,
        request: CheckoutRequest,
    ) -> Result<CheckoutResponse, BillingError> {
        let response = self
            .client
            .post(self.config.endpoint(path))
            .json(&request)
            .send()
            .await
            .map_err(|e| BillingError::Network(e.to_string()))?;

        Self::read_data(response).await
    }

    async fn portal_url(&self) -> Result<String, BillingError> {
        let response = self
            .client
            .get(self.config.endpoint(PORTAL_PATH))
            .send()
            .await
            .map_err(|e| BillingError::Network(e.to_string()))?;

        let url: String = Self::read_data(response).await?;
        Url::parse(&url).map_err(|e| BillingError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(url)
    }
}
