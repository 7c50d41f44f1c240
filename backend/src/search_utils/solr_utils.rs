use std::collections::BTreeMap;

use common::{fetch_error::FetchError, pivot::PivotNode};
use serde::{Deserialize, de::DeserializeOwned};

pub const MEDIA_JSON: &str = "application/json";

#[derive(Debug, Deserialize)]
pub struct RawFacetResponse {
    pub response: RawResponseHeader,
    pub facet_counts: RawFacetCounts,
}

#[derive(Debug, Deserialize)]
pub struct RawResponseHeader {
    #[serde(rename = "numFound")]
    pub num_found: u64,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawFacetCounts {
    /// Flat `[value, count, value, count, ...]` lists keyed by field.
    #[serde(default)]
    pub facet_fields: BTreeMap<String, Vec<serde_json::Value>>,
    #[serde(default)]
    pub facet_pivot: BTreeMap<String, Vec<RawPivotNode>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawPivotNode {
    pub value: serde_json::Value,
    pub count: u64,
    #[serde(default)]
    pub pivot: Option<Vec<RawPivotNode>>,
}

/// Facet values come back as strings, numbers or booleans depending on the field type.
pub fn facet_value_text(value: &serde_json::Value) -> Result<String, FetchError> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(FetchError::malformed(format!("unexpected facet value: {}", value))),
    }
}

/// Pairs up a flat facet list, keeping the order the index returned.
pub fn facet_pairs(field: &str, flat: &[serde_json::Value]) -> Result<Vec<(String, u64)>, FetchError> {
    if flat.len() % 2 != 0 {
        return Err(FetchError::malformed(format!("facet list for {} has odd length {}", field, flat.len())));
    }
    flat.chunks(2)
        .map(|pair| {
            let value = facet_value_text(&pair[0])?;
            let count = pair[1]
                .as_u64()
                .ok_or_else(|| FetchError::malformed(format!("facet count for {}={} is not a count: {}", field, value, pair[1])))?;
            Ok((value, count))
        })
        .collect()
}

pub fn pivot_nodes(raw: &[RawPivotNode]) -> Result<Vec<PivotNode>, FetchError> {
    raw.iter()
        .map(|node| {
            Ok(PivotNode {
                value: facet_value_text(&node.value)?,
                count: node.count,
                pivot: match &node.pivot {
                    Some(children) => Some(pivot_nodes(children)?),
                    None => None,
                },
            })
        })
        .collect()
}

/// GET against a search handler; `params` may repeat keys.
pub async fn solr_get<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    params: &[(String, String)],
) -> Result<T, FetchError> {
    let t0 = std::time::Instant::now();
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, MEDIA_JSON)
        .query(params)
        .send()
        .await
        .map_err(FetchError::network)?;
    let status = response.status();
    let response_txt = response.text().await.map_err(FetchError::network)?;
    if status.is_client_error() || status.is_server_error() {
        return Err(FetchError::network(format!("{}: {}", status, response_txt)));
    }
    let dt_ms = t0.elapsed().as_millis() as u64;
    tracing::info!(url, dt_ms, len = response_txt.len(), "search response received");
    serde_json::from_str(&response_txt).map_err(FetchError::malformed)
}
