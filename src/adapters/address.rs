use crate::domain::model::PostalAddress;
use crate::domain::ports::DeviceAddress;
use crate::utils::error::{Result, SkillError};
use async_trait::async_trait;
use reqwest::Client;

/// Device-address client for the voice platform's settings API. The API
/// endpoint and the bearer token arrive with each request envelope, so
/// the client itself is stateless.
pub struct AlexaAddressClient {
    client: Client,
}

impl AlexaAddressClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for AlexaAddressClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceAddress for AlexaAddressClient {
    async fn full_address(
        &self,
        api_endpoint: &str,
        device_id: &str,
        token: &str,
    ) -> Result<PostalAddress> {
        let url = format!(
            "{}/v1/devices/{}/settings/address",
            api_endpoint.trim_end_matches('/'),
            device_id
        );

        tracing::debug!("📡 address request to: {}", url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            return Err(SkillError::AddressFetchFailed {
                status: Some(response.status().as_u16()),
            });
        }

        Ok(response.json().await?)
    }
}
