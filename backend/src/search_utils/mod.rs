//! Helpers for talking to the search index.

pub mod solr_utils;
