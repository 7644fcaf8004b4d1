//! BiteFinder Lambda - relays restaurant searches to the places provider.
//!
//! Accepts a POST whose JSON body (or query string) names a verb:
//! - `create` - fresh open-now restaurant search around a coordinate
//! - `nextpage` - continuation of an earlier search by page token
//! - `photo` - fetch one place photo, returned base64-encoded

use std::collections::HashMap;
use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error as LambdaError, LambdaEvent};
use shared::{
    ApiGatewayRequest, ApiGatewayResponse, Config, Error, PlacesClient, RequestEnvelope,
    SearchCriteria, Verb,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application state shared across invocations.
struct AppState {
    config: Config,
    places: PlacesClient,
}

impl AppState {
    fn new() -> Self {
        let config = Config::from_env();
        let places = PlacesClient::new(&config);
        Self { config, places }
    }
}

async fn handler(
    state: Arc<AppState>,
    event: LambdaEvent<ApiGatewayRequest>,
) -> Result<ApiGatewayResponse, LambdaError> {
    Ok(serve(&state, &event.payload).await)
}

/// Serve one request, converting every failure into a response record.
///
/// Nothing propagates past this point; an upstream failure must not
/// take the process down for concurrent or future invocations.
async fn serve(state: &AppState, request: &ApiGatewayRequest) -> ApiGatewayResponse {
    match route(state, request).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, status = err.status_code(), "request failed");
            ApiGatewayResponse::status_text(err.status_code())
        }
    }
}

/// Dispatch one request to the flow its verb names.
async fn route(state: &AppState, request: &ApiGatewayRequest) -> Result<ApiGatewayResponse, Error> {
    if request.http_method != "POST" {
        return Err(Error::MethodNotAllowed(request.http_method.clone()));
    }

    let envelope = parse_envelope(request)?;
    match Verb::parse(&envelope.verb) {
        Some(Verb::Create) => create(state, &envelope).await,
        Some(Verb::NextPage) => next_page(state, &envelope).await,
        Some(Verb::Photo) => photo(state, &envelope).await,
        None => Err(Error::Validation(format!(
            "unrecognized verb {:?}",
            envelope.verb
        ))),
    }
}

/// Read the envelope from the JSON body when one is present, falling
/// back to query-string parameters.
fn parse_envelope(request: &ApiGatewayRequest) -> Result<RequestEnvelope, Error> {
    match request.body.as_deref() {
        Some(body) if !body.trim().is_empty() => RequestEnvelope::from_json(body),
        _ => {
            let empty = HashMap::new();
            let params = request.query_string_parameters.as_ref().unwrap_or(&empty);
            RequestEnvelope::from_query(params)
        }
    }
}

async fn create(
    state: &AppState,
    envelope: &RequestEnvelope,
) -> Result<ApiGatewayResponse, Error> {
    let lat = envelope
        .lat
        .ok_or_else(|| Error::Validation("lat is required".to_string()))?;
    let long = envelope
        .long
        .ok_or_else(|| Error::Validation("long is required".to_string()))?;

    let criteria = SearchCriteria::restaurants(
        lat,
        long,
        envelope.radius.unwrap_or(0),
        envelope.min_price.unwrap_or(0),
        envelope.max_price.unwrap_or(0),
    );
    let page = state.places.nearby_search(&criteria).await?;

    info!(results = page.results.len(), "create search served");
    ApiGatewayResponse::json(&page, state.config.cors_origin())
}

async fn next_page(
    state: &AppState,
    envelope: &RequestEnvelope,
) -> Result<ApiGatewayResponse, Error> {
    let token = envelope
        .page_token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Validation("pageToken is required".to_string()))?;

    let page = state.places.next_page(token).await?;

    info!(results = page.results.len(), "next page served");
    ApiGatewayResponse::json(&page, state.config.cors_origin())
}

async fn photo(state: &AppState, envelope: &RequestEnvelope) -> Result<ApiGatewayResponse, Error> {
    let reference = envelope
        .photo_ref
        .as_deref()
        .filter(|reference| !reference.is_empty())
        .ok_or_else(|| Error::Validation("photoRef is required".to_string()))?;

    let photo = state.places.fetch_photo(reference).await?;

    info!(bytes = photo.bytes.len(), "photo served");
    Ok(ApiGatewayResponse::binary(
        &photo.bytes,
        &photo.content_type,
        state.config.cors_origin(),
    ))
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new());

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
