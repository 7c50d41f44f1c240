//! Server functions called by the overview page.

pub mod overview_api;
