use crate::AppState;
use crate::api::models::endpoints::EndpointsEnvelope;
use crate::errors::Error;
use axum::{Json, extract::State};

#[utoipa::path(
    get,
    path = "/api",
    tag = "meta",
    summary = "Describe the API",
    description = "Serves the catalog of every available endpoint with its accepted queries and example payloads.",
    responses(
        (status = 200, description = "Endpoint catalog keyed by \"METHOD /path\"", body = EndpointsEnvelope)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_endpoints(State(state): State<AppState>) -> Json<EndpointsEnvelope> {
    Json(EndpointsEnvelope {
        endpoints: state.endpoints.as_value().clone(),
    })
}

#[utoipa::path(
    get,
    path = "/api/healthz",
    tag = "meta",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Server is accepting requests", body = String)
    )
)]
pub async fn healthz() -> &'static str {
    "OK"
}

/// Fallback for any method and path the router does not know.
pub async fn not_found() -> Error {
    Error::EndpointNotFound
}
