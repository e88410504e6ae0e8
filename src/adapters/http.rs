use crate::domain::model::{ProfileId, RawResponse};
use crate::domain::ports::{ConfigProvider, ProfileSource};
use crate::utils::error::{Result, StoreError};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

const ID_PLACEHOLDER: &str = "{id}";

/// `ProfileSource` backed by a plain GET against a configured endpoint.
///
/// The id only reaches the wire when the endpoint contains `{id}`.
#[derive(Debug, Clone)]
pub struct HttpProfileSource {
    client: Client,
    endpoint: String,
}

impl HttpProfileSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Validates `config` before building the client, so a zero timeout or a
    /// non-http endpoint never reaches the wire.
    pub fn from_config<C: ConfigProvider + Validate>(config: &C) -> Result<Self> {
        config.validate()?;
        Self::new(config.endpoint(), config.timeout())
    }

    pub fn request_url(&self, id: &ProfileId) -> String {
        if self.endpoint.contains(ID_PLACEHOLDER) {
            self.endpoint.replace(ID_PLACEHOLDER, &id.to_string())
        } else {
            self.endpoint.clone()
        }
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn request(&self, id: &ProfileId) -> Result<RawResponse> {
        let url = self.request_url(id);

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(StoreError::HttpStatusError {
                status: status.as_u16(),
                url,
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;

        Ok(RawResponse {
            url: final_url,
            status: status.as_u16(),
            body,
            received_at: Utc::now(),
        })
    }
}
