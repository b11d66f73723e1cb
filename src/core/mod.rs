pub mod aggregator;
pub mod pipeline;
pub mod poller;

pub use crate::domain::model::{
    BookQuery, BranchEntry, CatalogItem, CatalogMatch, CheckSnapshot, Coordinates, LoanableBranch,
    SearchReport, SystemAvailability,
};
pub use crate::domain::ports::{
    AvailabilityCheck, CatalogSearch, ConfigProvider, DeviceAddress, Geocoding, LibraryDirectory,
};
pub use crate::utils::error::Result;
