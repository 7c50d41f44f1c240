use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use reqwest::StatusCode;
use tracing::info;

use crate::{config::SummaryConfig, search_utils::solr_utils::MEDIA_JSON};

async fn _thing_select(config: &SummaryConfig, query: Option<String>) -> anyhow::Result<Response> {
    let mut url = reqwest::Url::parse(&config.select_url()).context("Failed to parse select url")?;
    url.set_query(query.as_deref());
    info!("Forwarding select: {}", url);

    let response = reqwest::Client::new()
        .get(url)
        .header(reqwest::header::ACCEPT, MEDIA_JSON)
        .send()
        .await
        .context("Select request failed")?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(MEDIA_JSON)
        .to_string();
    let body = Body::from_stream(response.bytes_stream());
    Ok((status, [(CONTENT_TYPE, content_type)], body).into_response())
}

/// Relays `/thing/select?...` to the configured search handler unchanged.
pub async fn thing_select(State(config): State<Arc<SummaryConfig>>, RawQuery(query): RawQuery) -> Response {
    match _thing_select(&config, query).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("thing_select: request failed: {:#?}", e);
            (StatusCode::BAD_GATEWAY, Body::from(e.to_string())).into_response()
        }
    }
}

pub fn thing_select_route(config: SummaryConfig) -> MethodRouter {
    get(thing_select).with_state(Arc::new(config))
}
