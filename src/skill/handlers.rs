use crate::core::pipeline::SearchPipeline;
use crate::domain::model::{BookQuery, SearchReport};
use crate::domain::ports::{
    AvailabilityCheck, CatalogSearch, DeviceAddress, Geocoding, LibraryDirectory,
};
use crate::skill::request::{RequestEnvelope, SkillIntent};
use crate::skill::response::{ResponseBuilder, SkillResponse};
use crate::skill::speech;
use crate::utils::error::{Result, SkillError};
use std::time::Duration;

pub const ADDRESS_PERMISSION: &[&str] = &["read::alexa:device:all:address"];

/// The request handler: decodes the envelope, runs the lookup pipeline
/// for book searches, and renders every outcome as speech.
pub struct Skill<C, G, L, A>
where
    C: CatalogSearch,
    G: Geocoding,
    L: LibraryDirectory + AvailabilityCheck,
    A: DeviceAddress,
{
    pipeline: SearchPipeline<C, G, L>,
    address: A,
}

impl<C, G, L, A> Skill<C, G, L, A>
where
    C: CatalogSearch,
    G: Geocoding,
    L: LibraryDirectory + AvailabilityCheck,
    A: DeviceAddress,
{
    pub fn new(catalog: C, geocoder: G, library: L, address: A, poll_interval: Duration) -> Self {
        Self {
            pipeline: SearchPipeline::new(catalog, geocoder, library, poll_interval),
            address,
        }
    }

    pub async fn handle(&self, envelope: &RequestEnvelope) -> SkillResponse {
        match envelope.intent() {
            SkillIntent::Launch => ResponseBuilder::new()
                .speak(speech::LAUNCH)
                .reprompt(speech::ASK_TITLE)
                .build(),
            SkillIntent::Help | SkillIntent::Unrecognized => ResponseBuilder::new()
                .speak(speech::HELP)
                .reprompt(speech::HELP)
                .build(),
            SkillIntent::CancelOrStop => ResponseBuilder::new().speak(speech::GOODBYE).build(),
            SkillIntent::SessionEnded => ResponseBuilder::new().build(),
            SkillIntent::SearchBook { title } => self.handle_search(envelope, title).await,
        }
    }

    async fn handle_search(&self, envelope: &RequestEnvelope, title: Option<&str>) -> SkillResponse {
        match self.search(envelope, title).await {
            Ok(report) => search_response(&report),
            Err(e) => {
                tracing::warn!("search turn ended early: {}", e);
                error_response(&e)
            }
        }
    }

    async fn search(
        &self,
        envelope: &RequestEnvelope,
        title: Option<&str>,
    ) -> Result<SearchReport> {
        let system = &envelope.context.system;
        let consent_token = system.consent_token().ok_or(SkillError::PermissionDenied)?;

        let device_id = system
            .device
            .as_ref()
            .map(|device| device.device_id.as_str())
            .ok_or(SkillError::AddressFetchFailed { status: None })?;
        let api_endpoint = system
            .api_endpoint
            .as_deref()
            .ok_or(SkillError::AddressFetchFailed { status: None })?;
        let token = system.api_access_token.as_deref().unwrap_or(consent_token);

        let address = self.address.full_address(api_endpoint, device_id, token).await?;
        let postal_code = address
            .postal_code
            .filter(|postal| !postal.is_empty())
            .ok_or(SkillError::AddressIncomplete)?;

        let title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or(SkillError::MissingSlot)?;
        tracing::info!("🗣️ User spoke: {}", title);

        let query = BookQuery {
            title: title.to_string(),
        };
        self.pipeline.run(&query, &postal_code).await
    }
}

fn search_response(report: &SearchReport) -> SkillResponse {
    if report.loanable.is_empty() {
        // a completed run with nothing loanable is a valid outcome
        ResponseBuilder::new()
            .speak(speech::no_availability(&report.title))
            .build()
    } else {
        ResponseBuilder::new()
            .speak(speech::available(report))
            .simple_card(
                speech::card_title(&report.title),
                speech::card_body(&report.loanable),
            )
            .build()
    }
}

fn error_response(error: &SkillError) -> SkillResponse {
    match error {
        SkillError::PermissionDenied => ResponseBuilder::new()
            .speak(speech::PERMISSION_REQUIRED)
            .permissions_card(ADDRESS_PERMISSION)
            .build(),
        SkillError::AddressIncomplete => ResponseBuilder::new()
            .speak(speech::ADDRESS_INCOMPLETE)
            .build(),
        // transport and decode errors only reach this level from the
        // device-address call; the pipeline maps its own stages
        SkillError::AddressFetchFailed { .. }
        | SkillError::HttpError(_)
        | SkillError::SerializationError(_) => ResponseBuilder::new()
            .speak(speech::ADDRESS_FETCH_FAILED)
            .build(),
        SkillError::MissingSlot => ResponseBuilder::new()
            .speak(speech::ASK_TITLE)
            .reprompt(speech::ASK_TITLE)
            .build(),
        SkillError::CatalogNotFound { title } => ResponseBuilder::new()
            .speak(speech::not_found(title))
            .build(),
        SkillError::GeoUnsupported | SkillError::DirectoryUnsupported => ResponseBuilder::new()
            .speak(speech::AREA_UNSUPPORTED)
            .build(),
        _ => ResponseBuilder::new().speak(speech::GENERIC_TROUBLE).build(),
    }
}
