//! Facet summary endpoint and response shaping.

use common::{
    facet_summary::{FacetCell, FacetSummary, FacetTable, TOTAL_KEY},
    fetch_error::FetchError,
    pivot::{pivot_total, pivot_value},
    summary_view_state::FacetSummarySource,
};

use crate::{
    config::SummaryConfig,
    search_utils::solr_utils::{RawFacetResponse, facet_pairs, pivot_nodes, solr_get},
};

pub struct FacetSummaryBuilder {
    client: reqwest::Client,
    config: SummaryConfig,
}

impl FacetSummaryBuilder {
    pub fn new(config: SummaryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: SummaryConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Query parameters for a summary request; keys repeat.
    pub fn request_params(&self, query: &str, facet_fields: &[String]) -> Vec<(String, String)> {
        let source = &self.config.source_field;
        let mut params = vec![
            ("q".to_string(), query.to_string()),
            ("facet".to_string(), "on".to_string()),
            ("facet.method".to_string(), "enum".to_string()),
            ("wt".to_string(), "json".to_string()),
            ("rows".to_string(), "0".to_string()),
            ("facet.field".to_string(), source.clone()),
        ];
        for field in facet_fields {
            params.push(("facet.field".to_string(), field.clone()));
            params.push(("facet.pivot".to_string(), format!("{},{}", source, field)));
        }
        params
    }

    pub async fn build_facet_summary(&self, query: &str, facet_fields: &[String]) -> Result<FacetSummary, FetchError> {
        let params = self.request_params(query, facet_fields);
        let raw: RawFacetResponse = solr_get(&self.client, &self.config.select_url(), &params).await?;
        let summary = summarize_facet_response(&raw, facet_fields, &self.config.source_field)?;
        tracing::info!(
            query,
            total_records = summary.total_records,
            sources = summary.sources.len(),
            "facet summary built"
        );
        Ok(summary)
    }

    /// Record counts per source over the whole index, sources without records omitted.
    pub async fn counts_by_source(&self) -> Result<Vec<(String, u64)>, FetchError> {
        let source = &self.config.source_field;
        let params = vec![
            ("q".to_string(), "*:*".to_string()),
            ("facet".to_string(), "true".to_string()),
            ("facet.field".to_string(), source.clone()),
            ("facet.mincount".to_string(), "1".to_string()),
            ("rows".to_string(), "0".to_string()),
            ("wt".to_string(), "json".to_string()),
        ];
        let raw: RawFacetResponse = solr_get(&self.client, &self.config.select_url(), &params).await?;
        match raw.facet_counts.facet_fields.get(source) {
            Some(flat) => facet_pairs(source, flat),
            None => Err(FetchError::malformed(format!("no facet counts for {}", source))),
        }
    }
}

impl FacetSummarySource for FacetSummaryBuilder {
    async fn build_facet_summary(&self, query: &str, facet_fields: &[String]) -> Result<FacetSummary, FetchError> {
        FacetSummaryBuilder::build_facet_summary(self, query, facet_fields).await
    }
}

/// Reshapes a raw facet/pivot response into one table per requested field.
///
/// Rows are facet values in index order followed by a synthetic total row;
/// columns are the total plus one per source. Counts missing from the pivot
/// are zero.
pub fn summarize_facet_response(
    raw: &RawFacetResponse,
    facet_fields: &[String],
    source_field: &str,
) -> Result<FacetSummary, FetchError> {
    let facet_fields_raw = &raw.facet_counts.facet_fields;
    let mut summary = FacetSummary {
        fields: facet_fields.to_vec(),
        total_records: raw.response.num_found,
        ..Default::default()
    };

    if let Some(flat) = facet_fields_raw.get(source_field) {
        for (source, count) in facet_pairs(source_field, flat)? {
            summary.totals.insert(source.clone(), count);
            summary.sources.push(source);
        }
    }

    for field in facet_fields {
        if field == source_field {
            continue;
        }
        let pairs = match facet_fields_raw.get(field) {
            Some(flat) => facet_pairs(field, flat)?,
            None => Vec::new(),
        };
        let pivot = match raw.facet_counts.facet_pivot.get(&format!("{},{}", source_field, field)) {
            Some(nodes) => pivot_nodes(nodes)?,
            None => Vec::new(),
        };

        let mut table = FacetTable::default();
        for (key, count) in pairs {
            table.push_key(&key);
            table.set(&key, TOTAL_KEY, FacetCell::Count(count));
            for source in &summary.sources {
                table.set(&key, source, FacetCell::Count(pivot_value(&pivot, source, &key)));
            }
        }
        table.push_key(TOTAL_KEY);
        table.set(TOTAL_KEY, TOTAL_KEY, FacetCell::Missing);
        for source in &summary.sources {
            table.set(TOTAL_KEY, source, FacetCell::Count(pivot_total(&pivot, source)));
        }
        summary.facets.insert(field.clone(), table);
    }
    Ok(summary)
}

/// Builds a summary against the index configured in the environment; an
/// empty field list means the configured default fields.
pub async fn facet_summary_from_env(query: String, facet_fields: Vec<String>) -> Result<FacetSummary, FetchError> {
    let config = SummaryConfig::from_env();
    let facet_fields = if facet_fields.is_empty() { config.facet_fields.clone() } else { facet_fields };
    let builder = FacetSummaryBuilder::new(config);
    builder.build_facet_summary(&query, &facet_fields).await
}

pub async fn counts_by_source_from_env() -> Result<Vec<(String, u64)>, FetchError> {
    FacetSummaryBuilder::new(SummaryConfig::from_env()).counts_by_source().await
}


#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    const MATERIAL: &str = "hasMaterialCategory";

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn c(n: u64) -> FacetCell {
        FacetCell::Count(n)
    }

    fn row(cells: &[(&str, FacetCell)]) -> BTreeMap<String, FacetCell> {
        cells.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn sample_response() -> RawFacetResponse {
        serde_json::from_value(json!({
            "response": {"numFound": 5, "start": 0, "docs": []},
            "facet_counts": {
                "facet_queries": {},
                "facet_fields": {
                    "source": ["SESAR", 3, "OPENCONTEXT", 2],
                    "hasMaterialCategory": ["Rock", 4, "Mineral", 1]
                },
                "facet_pivot": {
                    "source,hasMaterialCategory": [
                        {"field": "source", "value": "SESAR", "count": 3,
                         "pivot": [{"field": "hasMaterialCategory", "value": "Rock", "count": 3}]},
                        {"field": "source", "value": "OPENCONTEXT", "count": 2,
                         "pivot": [{"field": "hasMaterialCategory", "value": "Rock", "count": 1},
                                   {"field": "hasMaterialCategory", "value": "Mineral", "count": 1}]}
                    ]
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn cross_tabulates_sources_and_values() {
        let summary = summarize_facet_response(&sample_response(), &fields(&[MATERIAL]), "source").unwrap();

        assert_eq!(summary.total_records, 5);
        assert_eq!(summary.sources, vec!["SESAR", "OPENCONTEXT"]);
        assert_eq!(summary.totals, BTreeMap::from([("SESAR".to_string(), 3), ("OPENCONTEXT".to_string(), 2)]));

        let table = summary.table(MATERIAL).unwrap();
        assert_eq!(table.ordered_keys, vec!["Rock", "Mineral", TOTAL_KEY]);
        assert_eq!(
            table.rows["Rock"],
            row(&[(TOTAL_KEY, c(4)), ("SESAR", c(3)), ("OPENCONTEXT", c(1))])
        );
        assert_eq!(
            table.rows["Mineral"],
            row(&[(TOTAL_KEY, c(1)), ("SESAR", c(0)), ("OPENCONTEXT", c(1))])
        );
        assert_eq!(
            table.rows[TOTAL_KEY],
            row(&[(TOTAL_KEY, FacetCell::Missing), ("SESAR", c(3)), ("OPENCONTEXT", c(2))])
        );
    }

    #[test]
    fn empty_response_yields_total_rows_only() {
        let raw: RawFacetResponse = serde_json::from_value(json!({
            "response": {"numFound": 0},
            "facet_counts": {
                "facet_fields": {"source": [], "hasMaterialCategory": [], "hasSpecimenCategory": []},
                "facet_pivot": {}
            }
        }))
        .unwrap();
        let requested = fields(&[MATERIAL, "hasSpecimenCategory"]);
        let summary = summarize_facet_response(&raw, &requested, "source").unwrap();

        assert_eq!(summary.total_records, 0);
        assert!(summary.sources.is_empty());
        assert_eq!(summary.fields, requested);
        for field in &requested {
            let table = &summary.facets[field];
            assert_eq!(table.ordered_keys, vec![TOTAL_KEY]);
            assert_eq!(table.rows[TOTAL_KEY], row(&[(TOTAL_KEY, FacetCell::Missing)]));
        }
    }

    #[test]
    fn missing_pivot_and_unknown_sources_count_zero() {
        let raw: RawFacetResponse = serde_json::from_value(json!({
            "response": {"numFound": 7},
            "facet_counts": {
                "facet_fields": {
                    "source": ["SESAR", 4, "GEOME", 3],
                    "hasContextCategory": ["Marine", 2]
                }
            }
        }))
        .unwrap();
        let summary = summarize_facet_response(&raw, &fields(&["hasContextCategory", "hasSpecimenCategory"]), "source").unwrap();

        let context = &summary.facets["hasContextCategory"];
        assert_eq!(
            context.rows["Marine"],
            row(&[(TOTAL_KEY, c(2)), ("SESAR", c(0)), ("GEOME", c(0))])
        );
        assert_eq!(
            context.rows[TOTAL_KEY],
            row(&[(TOTAL_KEY, FacetCell::Missing), ("SESAR", c(0)), ("GEOME", c(0))])
        );
        // requested but absent from facet_fields
        assert_eq!(summary.facets["hasSpecimenCategory"].ordered_keys, vec![TOTAL_KEY]);
    }

    #[test]
    fn source_field_is_not_tabulated() {
        let summary = summarize_facet_response(&sample_response(), &fields(&["source", MATERIAL]), "source").unwrap();
        assert!(!summary.facets.contains_key("source"));
        assert!(summary.facets.contains_key(MATERIAL));
        assert_eq!(summary.fields, vec!["source", MATERIAL]);
    }

    #[test]
    fn malformed_counts_fail_the_whole_summary() {
        let raw: RawFacetResponse = serde_json::from_value(json!({
            "response": {"numFound": 1},
            "facet_counts": {"facet_fields": {"source": ["SESAR", 1], "hasMaterialCategory": ["Rock"]}}
        }))
        .unwrap();
        let err = summarize_facet_response(&raw, &fields(&[MATERIAL]), "source").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn request_params_follow_field_order() {
        let builder = FacetSummaryBuilder::new(SummaryConfig::default());
        let params = builder.request_params("Rock", &fields(&[MATERIAL, "hasContextCategory"]));
        let expected: Vec<(String, String)> = [
            ("q", "Rock"),
            ("facet", "on"),
            ("facet.method", "enum"),
            ("wt", "json"),
            ("rows", "0"),
            ("facet.field", "source"),
            ("facet.field", MATERIAL),
            ("facet.pivot", "source,hasMaterialCategory"),
            ("facet.field", "hasContextCategory"),
            ("facet.pivot", "source,hasContextCategory"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(params, expected);
    }
}
