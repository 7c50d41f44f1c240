//! Endpoint and field configuration, with environment overrides.

use common::{
    count_format::{CountFormat, DEFAULT_MISSING_MARKER},
    summary_view_state::DEFAULT_FACET_FIELDS,
};

pub const DEFAULT_SOLR_URL: &str = "http://localhost:8983/solr/isb_core_records/";
pub const DEFAULT_SELECT_PATH: &str = "select";
pub const DEFAULT_SOURCE_FIELD: &str = "source";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REVISION_REPOSITORY: &str = "isamplesorg/isamples_inabox";
pub const DEFAULT_REVISION_BRANCH: &str = "develop";
pub const USER_AGENT: &str = concat!("record-overview/", env!("CARGO_PKG_VERSION"));

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty()).unwrap_or(default.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    /// Base URL of the search core.
    pub solr_url: String,
    pub select_path: String,
    /// Field naming the collection each record came from.
    pub source_field: String,
    pub facet_fields: Vec<String>,
    /// Shown in place of a count the pivot could not supply.
    pub missing_marker: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            solr_url: DEFAULT_SOLR_URL.to_string(),
            select_path: DEFAULT_SELECT_PATH.to_string(),
            source_field: DEFAULT_SOURCE_FIELD.to_string(),
            facet_fields: DEFAULT_FACET_FIELDS.iter().map(|f| f.to_string()).collect(),
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
        }
    }
}

impl SummaryConfig {
    /// Reads `SOLR_URL`, `SOLR_SELECT_PATH`, `OVERVIEW_SOURCE_FIELD`,
    /// `OVERVIEW_MISSING_MARKER` and the comma separated `OVERVIEW_FACET_FIELDS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let facet_fields = match std::env::var("OVERVIEW_FACET_FIELDS") {
            Ok(v) => {
                let fields = parse_field_list(&v);
                if fields.is_empty() { defaults.facet_fields } else { fields }
            }
            Err(_) => defaults.facet_fields,
        };
        Self {
            solr_url: env_or("SOLR_URL", DEFAULT_SOLR_URL),
            select_path: env_or("SOLR_SELECT_PATH", DEFAULT_SELECT_PATH),
            source_field: env_or("OVERVIEW_SOURCE_FIELD", DEFAULT_SOURCE_FIELD),
            facet_fields,
            missing_marker: env_or("OVERVIEW_MISSING_MARKER", DEFAULT_MISSING_MARKER),
        }
    }

    pub fn count_format(&self) -> CountFormat {
        CountFormat { missing_marker: self.missing_marker.clone() }
    }

    pub fn select_url(&self) -> String {
        join_url(&self.solr_url, &self.select_path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryConfig {
    pub api_url: String,
    /// `owner/name`
    pub repository: String,
    pub branch: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            repository: DEFAULT_REVISION_REPOSITORY.to_string(),
            branch: DEFAULT_REVISION_BRANCH.to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Reads `GITHUB_API_URL`, `REVISION_REPOSITORY` and `REVISION_BRANCH`.
    pub fn from_env() -> Self {
        Self {
            api_url: env_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            repository: env_or("REVISION_REPOSITORY", DEFAULT_REVISION_REPOSITORY),
            branch: env_or("REVISION_BRANCH", DEFAULT_REVISION_BRANCH),
        }
    }

    pub fn latest_commit_url(&self) -> String {
        join_url(&self.api_url, &format!("repos/{}/commits/{}", self.repository, self.branch))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn parse_field_list(v: &str) -> Vec<String> {
    v.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| f.to_string())
        .collect()
}
