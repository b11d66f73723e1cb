use crate::domain::model::{
    BranchEntry, CatalogItem, CheckSnapshot, Coordinates, PostalAddress,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, keywords: &str) -> Result<Vec<CatalogItem>>;
}

#[async_trait]
pub trait Geocoding: Send + Sync {
    async fn search_by_postal(&self, postal_code: &str) -> Result<Coordinates>;
}

#[async_trait]
pub trait LibraryDirectory: Send + Sync {
    async fn nearby(&self, coords: &Coordinates) -> Result<Vec<BranchEntry>>;
}

#[async_trait]
pub trait AvailabilityCheck: Send + Sync {
    /// One status request. `session` carries the continuation token from
    /// the previous response once the service starts returning one.
    async fn check(
        &self,
        isbn: &str,
        system_id: &str,
        session: Option<&str>,
    ) -> Result<CheckSnapshot>;
}

#[async_trait]
pub trait DeviceAddress: Send + Sync {
    async fn full_address(
        &self,
        api_endpoint: &str,
        device_id: &str,
        token: &str,
    ) -> Result<PostalAddress>;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_endpoint(&self) -> &str;
    fn catalog_locale(&self) -> &str;
    fn catalog_access_key(&self) -> &str;
    fn catalog_associate_tag(&self) -> &str;
    fn geocode_endpoint(&self) -> &str;
    fn library_endpoint(&self) -> &str;
    fn library_app_key(&self) -> &str;
    fn poll_interval(&self) -> Duration;
}
