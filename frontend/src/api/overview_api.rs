//! Client API calls for overview endpoints.

use common::{count_format::CountFormat, facet_summary::FacetSummary, repository_info::RepositoryRevision};
use dioxus::prelude::*;

#[cfg(feature = "server")]
use common::fetch_error::FetchError;

/// Status code carried by server errors caused by an unexpected upstream response.
pub const MALFORMED_RESPONSE_CODE: u16 = 500;
pub const UPSTREAM_FAILURE_CODE: u16 = 502;

#[cfg(feature = "server")]
fn to_server_error(e: FetchError) -> ServerFnError {
    let (code, message) = match e {
        FetchError::Network(m) => (UPSTREAM_FAILURE_CODE, m),
        FetchError::MalformedResponse(m) => (MALFORMED_RESPONSE_CODE, m),
    };
    ServerFnError::ServerError { message, code, details: None }
}

#[server]
pub async fn facet_summary(query: String, facet_fields: Vec<String>) -> Result<FacetSummary, ServerFnError> {
    let x = backend::api::facet_summary_from_env(query, facet_fields).await;
    x.map_err(to_server_error)
}

#[server]
pub async fn latest_revision() -> Result<RepositoryRevision, ServerFnError> {
    let x = backend::api::latest_revision_from_env().await;
    x.map_err(to_server_error)
}

#[server]
pub async fn counts_by_source() -> Result<Vec<(String, u64)>, ServerFnError> {
    let x = backend::api::counts_by_source_from_env().await;
    x.map_err(to_server_error)
}

/// Cell display settings from the server config.
#[server]
pub async fn count_format_settings() -> Result<CountFormat, ServerFnError> {
    Ok(backend::config::SummaryConfig::from_env().count_format())
}
