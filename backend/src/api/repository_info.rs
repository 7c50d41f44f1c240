//! Latest revision of the project repository, from the hosting API.

use common::{
    fetch_error::FetchError,
    repository_info::{RepositoryRevision, RevisionSource},
};
use serde::Deserialize;

use crate::config::{RepositoryConfig, USER_AGENT};

#[derive(Debug, Deserialize)]
struct RawCommit {
    sha: String,
    commit: RawCommitDetail,
}

#[derive(Debug, Deserialize)]
struct RawCommitDetail {
    author: RawCommitAuthor,
}

#[derive(Debug, Deserialize)]
struct RawCommitAuthor {
    date: String,
}

pub struct RevisionFetcher {
    client: reqwest::Client,
    config: RepositoryConfig,
}

impl RevisionFetcher {
    pub fn new(config: RepositoryConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }

    pub async fn latest_revision(&self) -> Result<RepositoryRevision, FetchError> {
        let url = self.config.latest_commit_url();
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(FetchError::network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::network(format!("{}: {}", url, status)));
        }
        let txt = response.text().await.map_err(FetchError::network)?;
        let raw: RawCommit = serde_json::from_str(&txt).map_err(FetchError::malformed)?;
        tracing::info!(sha = %raw.sha, "fetched latest revision");
        Ok(RepositoryRevision { sha: raw.sha, date: raw.commit.author.date })
    }
}

impl RevisionSource for RevisionFetcher {
    async fn latest_revision(&self) -> Result<RepositoryRevision, FetchError> {
        RevisionFetcher::latest_revision(self).await
    }
}

pub async fn latest_revision_from_env() -> Result<RepositoryRevision, FetchError> {
    RevisionFetcher::new(RepositoryConfig::from_env()).latest_revision().await
}
