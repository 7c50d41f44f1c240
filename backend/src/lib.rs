//! Server side of the record overview: search index and hosting API access.

pub mod api;
pub mod config;
pub mod search_utils;
pub mod server_extra;
