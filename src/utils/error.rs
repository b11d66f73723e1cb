use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("Service request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Response decode failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Service reported an error: {message}")]
    ApiError { message: String },

    #[error("Address permission has not been granted")]
    PermissionDenied,

    #[error("Device address has no postal code")]
    AddressIncomplete,

    #[error("Device address lookup failed (status: {status:?})")]
    AddressFetchFailed { status: Option<u16> },

    #[error("No book title was captured")]
    MissingSlot,

    #[error("No catalog item with a numeric ISBN for {title}")]
    CatalogNotFound { title: String },

    #[error("Geocoding is not available for the configured address")]
    GeoUnsupported,

    #[error("Library directory is not available for the location")]
    DirectoryUnsupported,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SkillError>;
