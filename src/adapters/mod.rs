pub mod address;
pub mod catalog;
pub mod geocode;
pub mod library;

pub use address::AlexaAddressClient;
pub use catalog::CatalogClient;
pub use geocode::GeoApiClient;
pub use library::CalilClient;
