use crate::domain::model::Coordinates;
use crate::domain::ports::{ConfigProvider, Geocoding};
use crate::utils::error::{Result, SkillError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

/// Postal-code geocoding client (`method=searchByPostal`).
pub struct GeoApiClient {
    client: Client,
    endpoint: String,
}

impl GeoApiClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.geocode_endpoint().to_string(),
        }
    }
}

#[async_trait]
impl Geocoding for GeoApiClient {
    async fn search_by_postal(&self, postal_code: &str) -> Result<Coordinates> {
        tracing::debug!("📡 geocode request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("method", "searchByPostal"), ("postal", postal_code)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SkillError::ApiError {
                message: format!("geocoding returned status {}", response.status()),
            });
        }

        let body: GeoResponse = response.json().await?;
        if let Some(error) = body.response.error {
            return Err(SkillError::ApiError {
                message: format!("geocoding reported: {}", error),
            });
        }

        let location = body
            .response
            .location
            .into_iter()
            .next()
            .ok_or_else(|| SkillError::ApiError {
                message: "geocoding returned no location".to_string(),
            })?;

        Ok(Coordinates {
            x: location.x,
            y: location.y,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    response: GeoBody,
}

#[derive(Debug, Deserialize)]
struct GeoBody {
    #[serde(default)]
    location: Vec<GeoLocation>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeoLocation {
    #[serde(deserialize_with = "decimal_from_string_or_number")]
    x: f64,
    #[serde(deserialize_with = "decimal_from_string_or_number")]
    y: f64,
}

// The live geocoder returns its decimals as JSON strings.
fn decimal_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
