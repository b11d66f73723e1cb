use crate::domain::model::{BranchEntry, CheckSnapshot, Coordinates};
use crate::domain::ports::{AvailabilityCheck, ConfigProvider, LibraryDirectory};
use crate::utils::error::{Result, SkillError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// The directory endpoint's own result limit.
pub const DIRECTORY_LIMIT: usize = 10;

/// Library availability service client. One client serves both endpoints:
/// the branch directory and the per-system loan-status check.
pub struct CalilClient {
    client: Client,
    endpoint: String,
    app_key: String,
}

impl CalilClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.library_endpoint().trim_end_matches('/').to_string(),
            app_key: config.library_app_key().to_string(),
        }
    }
}

#[async_trait]
impl LibraryDirectory for CalilClient {
    async fn nearby(&self, coords: &Coordinates) -> Result<Vec<BranchEntry>> {
        let url = format!("{}/library", self.endpoint);
        let geocode = coords.to_geocode_param();
        let limit = DIRECTORY_LIMIT.to_string();

        tracing::debug!("📡 directory request to: {}", url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("appkey", self.app_key.as_str()),
                ("format", "json"),
                ("callback", ""),
                ("limit", limit.as_str()),
                ("geocode", geocode.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SkillError::ApiError {
                message: format!("library directory returned status {}", response.status()),
            });
        }

        let body = response.text().await?;
        let entries: Vec<DirectoryEntry> = serde_json::from_str(&body)?;

        Ok(entries
            .into_iter()
            .map(|entry| BranchEntry {
                system_id: entry.systemid,
                branch_key: entry.libkey,
                formal_name: entry.formal,
            })
            .collect())
    }
}

#[async_trait]
impl AvailabilityCheck for CalilClient {
    async fn check(
        &self,
        isbn: &str,
        system_id: &str,
        session: Option<&str>,
    ) -> Result<CheckSnapshot> {
        let url = format!("{}/check", self.endpoint);

        let mut request = self.client.get(&url).query(&[
            ("appkey", self.app_key.as_str()),
            ("format", "json"),
            ("callback", "no"),
            ("isbn", isbn),
            ("systemid", system_id),
        ]);
        if let Some(session) = session {
            request = request.query(&[("session", session)]);
        }

        tracing::debug!("📡 status request to: {}", url);
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(SkillError::ApiError {
                message: format!("status check returned status {}", response.status()),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    systemid: String,
    libkey: String,
    formal: String,
}
