//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod facet_summary;
pub mod count_format;
pub mod pivot;
pub mod fetch_error;
pub mod observable;
pub mod summary_view_state;
pub mod repository_info;
pub mod query_terms;
