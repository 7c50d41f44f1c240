//! Revision line shown in the site footer.

use std::{cell::RefCell, future::Future};

use serde::{Deserialize, Serialize};

use crate::{fetch_error::FetchError, observable::{Observers, SubscriptionId}};

const SHORT_SHA_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRevision {
    pub sha: String,
    /// Author date exactly as the hosting API reports it.
    pub date: String,
}

impl RepositoryRevision {
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(SHORT_SHA_LEN) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }

    pub fn describe(&self) -> String {
        format!("Revision {} at {}", self.short_sha(), self.date)
    }
}

pub trait RevisionSource {
    fn latest_revision(&self) -> impl Future<Output = Result<RepositoryRevision, FetchError>>;
}

#[derive(Default)]
pub struct RepositoryInfoState {
    info: RefCell<String>,
    observers: Observers<String>,
}

impl RepositoryInfoState {
    pub fn info(&self) -> String {
        self.info.borrow().clone()
    }

    pub fn subscribe(&self, observer: impl Fn(&String) + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Fetches the latest revision once. Failures only get logged; the line stays blank.
    pub async fn init<S: RevisionSource>(&self, source: &S) {
        let revision = match source.latest_revision().await {
            Ok(revision) => revision,
            Err(e) => {
                tracing::warn!("could not fetch repository revision: {}", e);
                return;
            }
        };
        let info = revision.describe();
        *self.info.borrow_mut() = info.clone();
        self.observers.notify(&info);
    }
}
