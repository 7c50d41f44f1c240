//! Adapters feeding the state containers from server functions.

use common::{
    facet_summary::FacetSummary,
    fetch_error::FetchError,
    repository_info::{RepositoryRevision, RevisionSource},
    summary_view_state::FacetSummarySource,
};
use dioxus::prelude::*;

use crate::api::overview_api::{MALFORMED_RESPONSE_CODE, facet_summary, latest_revision};

pub(crate) fn to_fetch_error(e: ServerFnError) -> FetchError {
    match e {
        ServerFnError::ServerError { message, code, .. } if code == MALFORMED_RESPONSE_CODE => {
            FetchError::MalformedResponse(message)
        }
        ServerFnError::ServerError { message, .. } => FetchError::Network(message),
        other => FetchError::network(other),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ServerSummarySource;

impl FacetSummarySource for ServerSummarySource {
    async fn build_facet_summary(&self, query: &str, facet_fields: &[String]) -> Result<FacetSummary, FetchError> {
        facet_summary(query.to_string(), facet_fields.to_vec())
            .await
            .map_err(to_fetch_error)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ServerRevisionSource;

impl RevisionSource for ServerRevisionSource {
    async fn latest_revision(&self) -> Result<RepositoryRevision, FetchError> {
        latest_revision().await.map_err(to_fetch_error)
    }
}
