use crate::domain::model::CatalogItem;
use crate::domain::ports::{CatalogSearch, ConfigProvider};
use crate::utils::error::{Result, SkillError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Product-catalog search client. Queries the book category with
/// item-attribute detail and returns the rows in response order.
pub struct CatalogClient {
    client: Client,
    endpoint: String,
    locale: String,
    access_key: String,
    associate_tag: String,
}

impl CatalogClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.catalog_endpoint().to_string(),
            locale: config.catalog_locale().to_string(),
            access_key: config.catalog_access_key().to_string(),
            associate_tag: config.catalog_associate_tag().to_string(),
        }
    }
}

#[async_trait]
impl CatalogSearch for CatalogClient {
    async fn search(&self, keywords: &str) -> Result<Vec<CatalogItem>> {
        tracing::debug!("📡 catalog request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("Operation", "ItemSearch"),
                ("SearchIndex", "Books"),
                ("ResponseGroup", "ItemAttributes"),
                ("Keywords", keywords),
                ("Locale", self.locale.as_str()),
                ("AWSAccessKeyId", self.access_key.as_str()),
                ("AssociateTag", self.associate_tag.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SkillError::ApiError {
                message: format!("catalog search returned status {}", response.status()),
            });
        }

        let body: CatalogResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(SkillError::ApiError {
                message: format!("catalog search reported: {}", error.message),
            });
        }

        Ok(body
            .items
            .into_iter()
            .map(|item| CatalogItem {
                isbn: item.attributes.isbn,
                title: item.attributes.title,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(rename = "Items", default)]
    items: Vec<CatalogResponseItem>,
    #[serde(rename = "Error", default)]
    error: Option<CatalogError>,
}

#[derive(Debug, Deserialize)]
struct CatalogResponseItem {
    #[serde(rename = "ItemAttributes", default)]
    attributes: ItemAttributes,
}

#[derive(Debug, Deserialize, Default)]
struct ItemAttributes {
    #[serde(rename = "ISBN")]
    isbn: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogError {
    #[serde(rename = "Message", default)]
    message: String,
}
