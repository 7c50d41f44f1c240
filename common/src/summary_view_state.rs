//! Observable state behind the record overview page.
//!
//! The container is single-threaded: it lives on the UI's event loop, and the
//! only suspension point is the summary request inside [`SummaryViewState::update`].
//! Overlapping updates are ordered by the sequence number they take when they
//! start; a response is applied only if no later-issued update has been
//! applied already, so a slow early response can never overwrite a newer one.
//! The same ordering governs the error slot: a failure is recorded, and a
//! recorded failure is cleared, only by an update newer than every update
//! that has already completed.

use std::{cell::{Cell, RefCell}, collections::BTreeMap, future::Future};

use crate::{
    facet_summary::{FacetSummary, FacetTable},
    fetch_error::FetchError,
    observable::{Observers, SubscriptionId},
};

pub const DEFAULT_QUERY: &str = "*:*";

pub const DEFAULT_FACET_FIELDS: [&str; 3] = [
    "hasMaterialCategory",
    "hasSpecimenCategory",
    "hasContextCategory",
];

/// Anything able to produce a [`FacetSummary`] for a query.
pub trait FacetSummarySource {
    fn build_facet_summary(
        &self,
        query: &str,
        facet_fields: &[String],
    ) -> impl Future<Output = Result<FacetSummary, FetchError>>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummarySnapshot {
    pub query: String,
    pub summary: FacetSummary,
    /// Failure of the newest completed update, if it failed.
    pub error: Option<FetchError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// A later update had already been applied; this response was dropped.
    Stale,
}

pub struct SummaryViewState {
    default_query: String,
    facet_fields: Vec<String>,
    state: RefCell<SummarySnapshot>,
    issued: Cell<u64>,
    applied: Cell<u64>,
    completed: Cell<u64>,
    observers: Observers<SummarySnapshot>,
}

impl Default for SummaryViewState {
    fn default() -> Self {
        Self::new(
            DEFAULT_QUERY,
            DEFAULT_FACET_FIELDS.iter().map(|f| f.to_string()).collect(),
        )
    }
}

impl SummaryViewState {
    pub fn new(default_query: &str, facet_fields: Vec<String>) -> Self {
        Self {
            default_query: default_query.to_string(),
            facet_fields,
            state: RefCell::new(SummarySnapshot {
                query: default_query.to_string(),
                summary: FacetSummary::default(),
                error: None,
            }),
            issued: Cell::new(0),
            applied: Cell::new(0),
            completed: Cell::new(0),
            observers: Observers::default(),
        }
    }

    pub fn query(&self) -> String {
        self.state.borrow().query.clone()
    }

    pub fn facet_fields(&self) -> &[String] {
        &self.facet_fields
    }

    pub fn total_records(&self) -> u64 {
        self.state.borrow().summary.total_records
    }

    pub fn fields(&self) -> Vec<String> {
        self.state.borrow().summary.fields.clone()
    }

    pub fn sources(&self) -> Vec<String> {
        self.state.borrow().summary.sources.clone()
    }

    pub fn totals(&self) -> BTreeMap<String, u64> {
        self.state.borrow().summary.totals.clone()
    }

    pub fn facets(&self) -> BTreeMap<String, FacetTable> {
        self.state.borrow().summary.facets.clone()
    }

    pub fn snapshot(&self) -> SummarySnapshot {
        self.state.borrow().clone()
    }

    pub fn error(&self) -> Option<FetchError> {
        self.state.borrow().error.clone()
    }

    /// Sequence number of the most recently issued update.
    pub fn latest_issued(&self) -> u64 {
        self.issued.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&SummarySnapshot) + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Edits the query text. Derived fields keep describing the previous
    /// query until the next [`update`](Self::update) lands.
    pub fn set_query(&self, query: &str) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            if state.query == query {
                return;
            }
            state.query = query.to_string();
            state.clone()
        };
        self.observers.notify(&snapshot);
    }

    /// Seeds the query from the page URL's `q` parameter, then updates.
    pub async fn init<S: FacetSummarySource>(
        &self,
        initial_query: Option<&str>,
        source: &S,
    ) -> Result<UpdateOutcome, FetchError> {
        let query = initial_query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(&self.default_query)
            .to_string();
        self.set_query(&query);
        self.update(source).await
    }

    /// Rebuilds the summary for the current query.
    ///
    /// On failure the previous summary is kept and the error is returned to
    /// the caller. The error is also stored in the snapshot unless a newer
    /// update has completed in the meantime.
    pub async fn update<S: FacetSummarySource>(&self, source: &S) -> Result<UpdateOutcome, FetchError> {
        let seq = self.issued.get() + 1;
        self.issued.set(seq);
        let query = self.query();
        tracing::debug!(seq, query = %query, "facet summary update issued");

        let result = source.build_facet_summary(&query, &self.facet_fields).await;
        let newest = seq > self.completed.get();
        if newest {
            self.completed.set(seq);
        }

        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(seq, query = %query, "facet summary update failed: {}", e);
                if newest {
                    let snapshot = {
                        let mut state = self.state.borrow_mut();
                        state.error = Some(e.clone());
                        state.clone()
                    };
                    self.observers.notify(&snapshot);
                }
                return Err(e);
            }
        };

        if seq <= self.applied.get() {
            tracing::debug!(seq, applied = self.applied.get(), "dropping stale facet summary");
            return Ok(UpdateOutcome::Stale);
        }
        self.applied.set(seq);
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.summary = summary;
            if newest {
                state.error = None;
            }
            state.clone()
        };
        self.observers.notify(&snapshot);
        Ok(UpdateOutcome::Applied)
    }
}
