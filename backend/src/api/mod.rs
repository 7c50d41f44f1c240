//! Overview API operations and module exports.

pub mod facet_summary;
pub use facet_summary::{counts_by_source_from_env, facet_summary_from_env};

pub mod repository_info;
pub use repository_info::latest_revision_from_env;
