pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod skill;
pub mod utils;

pub use adapters::{AlexaAddressClient, CalilClient, CatalogClient, GeoApiClient};
pub use config::EnvConfig;
pub use core::pipeline::SearchPipeline;
pub use skill::{RequestEnvelope, Skill, SkillResponse};
pub use utils::error::{Result, SkillError};
