#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use libsearch::adapters::{AlexaAddressClient, CalilClient, CatalogClient, GeoApiClient};
#[cfg(feature = "lambda")]
use libsearch::domain::ports::ConfigProvider;
#[cfg(feature = "lambda")]
use libsearch::skill::{RequestEnvelope, Skill, SkillResponse};
#[cfg(feature = "lambda")]
use libsearch::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use libsearch::EnvConfig;

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<RequestEnvelope>) -> Result<SkillResponse, Error> {
    tracing::info!("Handling skill request");

    let config = EnvConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    // nothing outlives one invocation; adapters are rebuilt per request
    let skill = Skill::new(
        CatalogClient::from_config(&config),
        GeoApiClient::from_config(&config),
        CalilClient::from_config(&config),
        AlexaAddressClient::new(),
        config.poll_interval(),
    );

    Ok(skill.handle(&event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
